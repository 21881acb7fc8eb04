use validator::Validate;

use crate::auth::password::verify_password;
use crate::entities::token::{AuthResponse, LoginRequest};
use crate::errors::AuthError;
use crate::repositories::token::TokenService;
use crate::settings::AppConfig;

/// The admin gate. One configured identity owns all content; anything else
/// is rejected here.
pub struct AuthHandler<T>
where
    T: TokenService,
{
    pub token_service: T,
    admin_email: String,
    admin_password_hash: String,
}

impl<T> AuthHandler<T>
where
    T: TokenService,
{
    pub fn new(token_service: T, config: &AppConfig) -> Self {
        AuthHandler {
            token_service,
            admin_email: config.admin_email.clone(),
            admin_password_hash: config.admin_password_hash.clone(),
        }
    }

    /// Case-sensitive comparison against the configured admin address.
    pub fn is_admin_email(&self, email: &str) -> bool {
        email == self.admin_email
    }

    /// Logs the admin in and issues an access token.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        request.validate().map_err(|_| AuthError::MissingCredentials)?;

        if !self.is_admin_email(&request.email) {
            return Err(AuthError::WrongCredentials);
        }

        let is_password_valid = verify_password(&request.password, &self.admin_password_hash)
            .map_err(|_| AuthError::WrongCredentials)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let access_token = self.token_service.create_jwt(&request.email)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!("Admin logged in successfully");
        Ok(AuthResponse::new(access_token))
    }
}
