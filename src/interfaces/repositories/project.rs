use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool, QueryBuilder};

use crate::{
    entities::project::{Project, ProjectInsert, ProjectRow},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Optional case-insensitive filters applied by the public listing.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub search: Option<String>,
    pub tech: Option<String>,
}

#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError>;
    async fn featured_projects(&self, limit: u32) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self) -> Result<i64, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("projects_slug_key") {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

fn into_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>, AppError> {
    rows.into_iter().map(Project::try_from).collect()
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO projects (
                title, slug, summary, project_type, tech_stack,
                repo_url, live_url, video_url, cover_image_url,
                content_mdx, featured, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.summary)
        .bind(project.project_type.to_string())
        .bind(&project.tech_stack)
        .bind(&project.repo_url)
        .bind(&project.live_url)
        .bind(&project.video_url)
        .bind(&project.cover_image_url)
        .bind(&project.content_mdx)
        .bind(project.featured)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(id)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }

    async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError> {
        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            UPDATE projects SET
                title = $1,
                slug = $2,
                summary = $3,
                project_type = $4,
                tech_stack = $5,
                repo_url = $6,
                live_url = $7,
                video_url = $8,
                cover_image_url = $9,
                content_mdx = $10,
                featured = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.slug)
        .bind(&project.summary)
        .bind(project.project_type.to_string())
        .bind(&project.tech_stack)
        .bind(&project.repo_url)
        .bind(&project.live_url)
        .bind(&project.video_url)
        .bind(&project.cover_image_url)
        .bind(&project.content_mdx)
        .bind(project.featured)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        row.try_into()
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM projects WHERE TRUE");

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            builder.push(" AND (title ILIKE ").push_bind(pattern.clone());
            builder.push(" OR summary ILIKE ").push_bind(pattern);
            builder.push(")");
        }

        if let Some(tech) = filter.tech.as_deref().filter(|t| !t.is_empty()) {
            builder.push(" AND EXISTS (SELECT 1 FROM unnest(tech_stack) AS t WHERE t ILIKE ");
            builder.push_bind(format!("%{}%", tech));
            builder.push(")");
        }

        builder.push(" ORDER BY featured DESC, created_at DESC");

        let query = builder.build_query_as::<ProjectRow>();
        let rows: Vec<ProjectRow> = query.fetch_all(&self.pool).await?;

        into_projects(rows)
    }

    async fn featured_projects(&self, limit: u32) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query_as::<_, ProjectRow>(
            r#"
            SELECT * FROM projects
            WHERE featured = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        into_projects(rows)
    }

    async fn count_projects(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }
}
