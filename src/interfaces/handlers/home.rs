use actix_web::{get, web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    errors::AppError,
    handlers::{cached_json, render_and_cache},
    AppState,
};

const FEATURED_LIMIT: u32 = 3;
const RECENT_POSTS_LIMIT: u32 = 3;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Folio API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Data behind the site's landing page: featured work plus the latest
/// writing. Cached under `/` and invalidated by content mutations.
#[instrument(skip(state))]
pub async fn home_content(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    if let Some(cached) = cached_json(&state.page_cache, "/") {
        return Ok(cached);
    }

    let featured_projects = state.project_handler.featured_projects(FEATURED_LIMIT).await?;
    let recent_posts = state.post_handler.recent_posts(RECENT_POSTS_LIMIT).await?;
    let recent_posts: Vec<_> = recent_posts.iter().map(|p| p.to_list_response()).collect();

    render_and_cache(
        &state.page_cache,
        "/",
        &serde_json::json!({
            "featured_projects": featured_projects,
            "recent_posts": recent_posts,
        }),
    )
}
