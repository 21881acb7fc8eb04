use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::post::{NewPostRequest, TogglePublishRequest},
    errors::AppError,
    handlers::{cached_json, render_and_cache},
    repositories::post::PostFilter,
    use_cases::extractors::AdminUser,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
}

impl PostListQuery {
    fn into_filter(self) -> PostFilter {
        PostFilter {
            search: self.search,
            tag: self.tag,
        }
    }

    fn is_unfiltered(&self) -> bool {
        self.search.as_deref().unwrap_or("").is_empty()
            && self.tag.as_deref().unwrap_or("").is_empty()
    }
}

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state, query))]
pub async fn get_published_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();

    // Only the unfiltered listing is cached; filtered views are cheap
    // one-off queries.
    if query.is_unfiltered() {
        if let Some(cached) = cached_json(&state.page_cache, "/blog") {
            return Ok(cached);
        }
    }

    let cacheable = query.is_unfiltered();
    let posts = state.post_handler.list_posts(true, &query.into_filter()).await?;
    let responses: Vec<_> = posts.iter().map(|p| p.to_list_response()).collect();

    if cacheable {
        return render_and_cache(&state.page_cache, "/blog", &responses);
    }

    Ok(HttpResponse::Ok().json(responses))
}

#[instrument(skip(state))]
pub async fn get_post_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let path = format!("/blog/{}", slug);

    if let Some(cached) = cached_json(&state.page_cache, &path) {
        return Ok(cached);
    }

    let post = state.post_handler.get_published_post_by_slug(&slug).await?;
    render_and_cache(&state.page_cache, &path, &post.to_detail_response())
}

// ───── Admin surface ────────────────────────────────────────────────

#[instrument(skip(_admin, state, query))]
pub async fn admin_get_all_posts(
    _admin: AdminUser,
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> Result<impl Responder, AppError> {
    let posts = state
        .post_handler
        .list_posts(false, &query.into_inner().into_filter())
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

#[instrument(skip(_admin, state))]
pub async fn admin_get_post(
    _admin: AdminUser,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let post = state.post_handler.get_post_by_id(&post_id).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_post(
    _admin: AdminUser,
    state: web::Data<AppState>,
    data: web::Json<NewPostRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.post_handler.create_post(data.into_inner()).await?;

    state.revalidator.revalidate_paths(["/admin/posts", "/blog", "/"]);

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_post(
    _admin: AdminUser,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewPostRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state.post_handler.update_post(&post_id, data.into_inner()).await?;

    state.revalidator.revalidate_paths([
        "/admin/posts".to_string(),
        "/blog".to_string(),
        format!("/blog/{}", updated.slug),
        "/".to_string(),
    ]);

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_admin, state, data))]
pub async fn toggle_publish_post(
    _admin: AdminUser,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<TogglePublishRequest>,
) -> Result<impl Responder, AppError> {
    let post = state
        .post_handler
        .toggle_publish(&post_id, data.published)
        .await?;

    state.revalidator.revalidate_paths(["/admin/posts", "/blog", "/"]);

    Ok(HttpResponse::Ok().json(post))
}

#[instrument(skip(_admin, state))]
pub async fn delete_post(
    _admin: AdminUser,
    post_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.post_handler.delete_post(&post_id).await?;

    state.revalidator.revalidate_paths(["/admin/posts", "/blog", "/"]);

    Ok(HttpResponse::NoContent().finish())
}
