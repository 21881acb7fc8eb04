use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    entities::project::NewProjectRequest,
    errors::AppError,
    handlers::{cached_json, render_and_cache},
    repositories::project::ProjectFilter,
    use_cases::extractors::AdminUser,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub search: Option<String>,
    pub tech: Option<String>,
}

impl ProjectListQuery {
    fn into_filter(self) -> ProjectFilter {
        ProjectFilter {
            search: self.search,
            tech: self.tech,
        }
    }

    fn is_unfiltered(&self) -> bool {
        self.search.as_deref().unwrap_or("").is_empty()
            && self.tech.as_deref().unwrap_or("").is_empty()
    }
}

// ───── Public read paths ────────────────────────────────────────────

#[instrument(skip(state, query))]
pub async fn get_all_projects(
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let query = query.into_inner();

    if query.is_unfiltered() {
        if let Some(cached) = cached_json(&state.page_cache, "/projects") {
            return Ok(cached);
        }
    }

    let cacheable = query.is_unfiltered();
    let projects = state.project_handler.list_projects(&query.into_filter()).await?;

    if cacheable {
        return render_and_cache(&state.page_cache, "/projects", &projects);
    }

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project_by_slug(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let path = format!("/projects/{}", slug);

    if let Some(cached) = cached_json(&state.page_cache, &path) {
        return Ok(cached);
    }

    let project = state.project_handler.get_project_by_slug(&slug).await?;
    render_and_cache(&state.page_cache, &path, &project.to_detail_response())
}

// ───── Admin surface ────────────────────────────────────────────────

#[instrument(skip(_admin, state, query))]
pub async fn admin_get_all_projects(
    _admin: AdminUser,
    state: web::Data<AppState>,
    query: web::Query<ProjectListQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .project_handler
        .list_projects(&query.into_inner().into_filter())
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(_admin, state))]
pub async fn admin_get_project(
    _admin: AdminUser,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_admin, state, data))]
pub async fn create_project(
    _admin: AdminUser,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.create_project(data.into_inner()).await?;

    state.revalidator.revalidate_paths(["/admin/projects", "/projects"]);

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_admin, state, data))]
pub async fn update_project(
    _admin: AdminUser,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let updated = state
        .project_handler
        .update_project(&project_id, data.into_inner())
        .await?;

    state.revalidator.revalidate_paths([
        "/admin/projects".to_string(),
        "/projects".to_string(),
        format!("/projects/{}", updated.slug),
    ]);

    Ok(HttpResponse::Ok().json(updated))
}

#[instrument(skip(_admin, state))]
pub async fn delete_project(
    _admin: AdminUser,
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.project_handler.delete_project(&project_id).await?;

    state.revalidator.revalidate_paths(["/admin/projects", "/projects"]);

    Ok(HttpResponse::NoContent().finish())
}
