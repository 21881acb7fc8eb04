use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{errors::AuthError, AppState};

/// Resolves Bearer tokens into claims for the gated surface: everything
/// under `/api/v1/admin` plus the upload endpoint. All other routes are
/// public and pass through untouched; the `AdminUser` extractor performs
/// the email comparison downstream.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path().to_owned();
            let method = req.method().as_str().to_owned();

            if !requires_auth(&path, &method) {
                return service.call(req).await;
            }

            // A server wired without state cannot authenticate anyone.
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                tracing::error!("AppState missing in auth middleware");
                return Ok(unauthorized_response(req, "Unauthorized"));
            };

            let Some(token) = extract_token(&req) else {
                tracing::warn!("Missing or malformed Authorization header");
                return Ok(unauthorized_response(req, "Unauthorized"));
            };

            let claims = match state.auth_handler.token_service.decode_jwt(&token) {
                Ok(data) => data.claims,
                Err(AuthError::TokenExpired) => {
                    return Ok(unauthorized_response(req, "Token has expired"));
                }
                Err(_) => {
                    return Ok(unauthorized_response(req, "Unauthorized"));
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

fn requires_auth(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return false;
    }

    path.starts_with("/api/v1/admin") || path.starts_with("/api/upload")
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
}

fn unauthorized_response(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    let response = HttpResponse::Unauthorized()
        .json(serde_json::json!({"error": message}));
    let (request, _) = req.into_parts();
    ServiceResponse::new(request, response)
}

#[cfg(test)]
mod tests {
    use super::requires_auth;

    #[test]
    fn admin_scope_and_upload_are_gated() {
        assert!(requires_auth("/api/v1/admin/posts", "GET"));
        assert!(requires_auth("/api/v1/admin/dashboard", "GET"));
        assert!(requires_auth("/api/upload", "POST"));
    }

    #[test]
    fn public_surface_is_open() {
        assert!(!requires_auth("/", "GET"));
        assert!(!requires_auth("/api/v1/posts", "GET"));
        assert!(!requires_auth("/api/v1/auth/login", "POST"));
        assert!(!requires_auth("/rss.xml", "GET"));
        assert!(!requires_auth("/api/v1/admin/posts", "OPTIONS"));
    }
}
