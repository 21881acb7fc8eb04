use actix_web::{post, get, web, HttpResponse, Responder, ResponseError};

use crate::entities::token::LoginRequest;
use crate::errors::AppError;
use crate::use_cases::extractors::AdminUser;
use crate::AppState;

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth_handler.login(request.into_inner()).await {
        Ok(auth_response) => HttpResponse::Ok().json(auth_response),
        Err(e) => e.error_response(),
    }
}

/// Content counts backing the admin landing page.
#[get("/dashboard")]
pub async fn admin_dashboard(
    admin: AdminUser,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let total_posts = state.post_handler.count_posts(false).await?;
    let published_posts = state.post_handler.count_posts(true).await?;
    let total_projects = state.project_handler.count_projects().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "admin": admin.0.email,
        "posts": {
            "total": total_posts,
            "published": published_posts,
            "drafts": total_posts - published_posts,
        },
        "projects": {
            "total": total_projects,
        },
    })))
}
