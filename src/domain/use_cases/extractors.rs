use actix_web::{web, FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Extractor for authenticated claims without the admin email check.
/// Handlers that need their own authorization contract (the upload
/// endpoint answers 401 for a mismatched email) start from this.
#[derive(Debug)]
pub struct AuthClaims(pub Claims);

impl FromRequest for AuthClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthClaims(claims.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

/// Extractor gating admin pages, actions, and the upload endpoint: the
/// authenticated session's email must equal the configured admin email.
/// Returns 401 without a session, 403 on a non-admin email.
/// Usage: add `admin: AdminUser` as a handler parameter.
#[derive(Debug)]
pub struct AdminUser(pub Claims);

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        // A mis-wired server (no state) degrades to unauthenticated.
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState missing while resolving AdminUser");
            return ready(Err(AuthError::MissingCredentials.into()));
        };

        match req.extensions().get::<Claims>() {
            Some(claims) if state.auth_handler.is_admin_email(&claims.email) => {
                ready(Ok(AdminUser(claims.clone())))
            }
            Some(_) => {
                ready(Err(AuthError::Forbidden("Admin access required".into()).into()))
            }
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}
