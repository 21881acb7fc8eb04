use actix_web::{http::header::ContentType, HttpResponse};
use serde::Serialize;

use crate::{cache::PageCache, errors::AppError};

pub mod auth;
pub mod feeds;
pub mod home;
pub mod json_error;
pub mod posts;
pub mod projects;
pub mod system;
pub mod upload;

/// Serves a previously rendered body for a public path, if present.
pub(crate) fn cached_json(cache: &PageCache, path: &str) -> Option<HttpResponse> {
    cache.get(path).map(|body| {
        HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body)
    })
}

/// Renders a response and remembers it under the path until the next
/// invalidation event.
pub(crate) fn render_and_cache<T: Serialize>(
    cache: &PageCache,
    path: &str,
    value: &T,
) -> Result<HttpResponse, AppError> {
    let body = serde_json::to_string(value)
        .map_err(|e| AppError::InternalError(format!("Serialization error: {}", e)))?;

    cache.insert(path, body.clone());

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}
