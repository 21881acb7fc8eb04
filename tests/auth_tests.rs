mod common;

use folio_backend::auth::jwt::JwtService;
use folio_backend::auth::password::hash_password;
use folio_backend::entities::token::LoginRequest;
use folio_backend::errors::AuthError;
use folio_backend::use_cases::auth::AuthHandler;

fn handler_with_password(password: &str) -> AuthHandler<JwtService> {
    let mut config = common::test_config();
    config.admin_password_hash = hash_password(password).expect("hashing succeeds");

    AuthHandler::new(JwtService::new(&config), &config)
}

#[tokio::test]
async fn login_succeeds_for_the_configured_admin() {
    let handler = handler_with_password("correct horse battery staple");

    let response = handler
        .login(LoginRequest {
            email: "admin@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .expect("login should succeed");

    assert_eq!(response.token_type, "Bearer");
    assert!(!response.access_token.is_empty());
}

#[tokio::test]
async fn issued_token_round_trips_the_admin_email() {
    let config = common::test_config();
    let jwt = JwtService::new(&config);

    let token = jwt.create_jwt("admin@example.com").unwrap();
    let decoded = jwt.decode_jwt(&token).unwrap();

    assert_eq!(decoded.claims.email, "admin@example.com");
    assert_eq!(decoded.claims.sub, "admin");
}

#[tokio::test]
async fn login_rejects_a_non_admin_email() {
    let handler = handler_with_password("correct horse battery staple");

    let result = handler
        .login(LoginRequest {
            email: "someone@example.com".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let handler = handler_with_password("correct horse battery staple");

    let result = handler
        .login(LoginRequest {
            email: "admin@example.com".to_string(),
            password: "guess".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthError::WrongCredentials)));
}

#[test]
fn admin_email_comparison_is_case_sensitive() {
    let handler = handler_with_password("pw");

    assert!(handler.is_admin_email("admin@example.com"));
    assert!(!handler.is_admin_email("Admin@example.com"));
    assert!(!handler.is_admin_email("admin@EXAMPLE.com"));
}

#[test]
fn tampered_tokens_are_rejected() {
    let config = common::test_config();
    let jwt = JwtService::new(&config);

    let token = jwt.create_jwt("admin@example.com").unwrap();
    let mut tampered = token.clone();
    tampered.push('x');

    assert!(matches!(jwt.decode_jwt(&tampered), Err(AuthError::InvalidToken)));
}
