use crate::{
    entities::project::{NewProjectRequest, Project, ProjectCreatedResponse, ProjectInsert},
    errors::AppError,
    repositories::project::{ProjectFilter, ProjectRepository},
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Creates a new project. Validation happens before any repository call.
    pub async fn create_project(&self, request: NewProjectRequest) -> Result<ProjectCreatedResponse, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        let id = self.project_repo.create_project(&insert).await?;

        Ok(ProjectCreatedResponse { id, slug: insert.slug })
    }

    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.get_project_by_id(&valid_id).await
    }

    pub async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        self.project_repo
            .get_project_by_slug(slug)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Project not found".to_string()),
                _ => e,
            })
    }

    /// Projects have no draft state; the listing is always the full set.
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter).await
    }

    pub async fn featured_projects(&self, limit: u32) -> Result<Vec<Project>, AppError> {
        self.project_repo.featured_projects(limit).await
    }

    pub async fn count_projects(&self) -> Result<i64, AppError> {
        self.project_repo.count_projects().await
    }

    /// Replaces an existing project with the validated payload.
    pub async fn update_project(&self, id: &str, request: NewProjectRequest) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        let insert = ProjectInsert::try_from(request)?;
        self.project_repo.update_project(&valid_id, &insert).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete_project(&valid_id).await
    }
}
