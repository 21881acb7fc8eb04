mod common;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use folio_backend::entities::post::{NewPostRequest, Post, PostInsert};
use folio_backend::entities::project::{NewProjectRequest, Project, ProjectInsert, ProjectType};
use folio_backend::errors::AppError;
use folio_backend::repositories::post::{PostFilter, PostRepository};
use folio_backend::repositories::project::{ProjectFilter, ProjectRepository};
use folio_backend::use_cases::{posts::PostHandler, projects::ProjectHandler};

mock! {
    pub PostRepo {}

    #[async_trait]
    impl PostRepository for PostRepo {
        async fn create_post(&self, post: &PostInsert) -> Result<Uuid, AppError>;
        async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError>;
        async fn get_post_by_slug(&self, slug: &str, published_only: bool) -> Result<Post, AppError>;
        async fn update_post(&self, id: &Uuid, post: &PostInsert) -> Result<Post, AppError>;
        async fn set_published_at(&self, id: &Uuid, published_at: Option<DateTime<Utc>>) -> Result<Post, AppError>;
        async fn list_posts(&self, published_only: bool, filter: &PostFilter) -> Result<Vec<Post>, AppError>;
        async fn recent_posts(&self, limit: u32) -> Result<Vec<Post>, AppError>;
        async fn count_posts(&self, published_only: bool) -> Result<i64, AppError>;
        async fn delete_post(&self, id: &Uuid) -> Result<(), AppError>;
        async fn check_connection(&self) -> Result<(), AppError>;
    }
}

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn create_project(&self, project: &ProjectInsert) -> Result<Uuid, AppError>;
        async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
        async fn get_project_by_slug(&self, slug: &str) -> Result<Project, AppError>;
        async fn update_project(&self, id: &Uuid, project: &ProjectInsert) -> Result<Project, AppError>;
        async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError>;
        async fn featured_projects(&self, limit: u32) -> Result<Vec<Project>, AppError>;
        async fn count_projects(&self) -> Result<i64, AppError>;
        async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    }
}

fn valid_post_request(slug: &str) -> NewPostRequest {
    NewPostRequest {
        title: "A Title".to_string(),
        slug: slug.to_string(),
        excerpt: "A short teaser.".to_string(),
        content_mdx: "Body text.".to_string(),
        tags: vec![],
        cover_image_url: None,
        reading_minutes: 2,
        published_at: None,
    }
}

fn valid_project_request(slug: &str) -> NewProjectRequest {
    NewProjectRequest {
        title: "My App".to_string(),
        slug: slug.to_string(),
        summary: "An app.".to_string(),
        project_type: ProjectType::Web,
        tech_stack: vec![],
        repo_url: None,
        live_url: None,
        video_url: None,
        cover_image_url: None,
        content_mdx: None,
        featured: false,
    }
}

// ───── Validation precedes persistence ──────────────────────────────

#[tokio::test]
async fn invalid_post_slug_never_reaches_the_repository() {
    // No expectations: any repository call would panic the test.
    let repo = MockPostRepo::new();
    let handler = PostHandler::new(repo);

    let result = handler.create_post(valid_post_request("My Post!!")).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn invalid_project_slug_never_reaches_the_repository() {
    let repo = MockProjectRepo::new();
    let handler = ProjectHandler::new(repo);

    let result = handler.create_project(valid_project_request("my-app!!")).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn valid_post_is_persisted_and_returns_its_slug() {
    let mut repo = MockPostRepo::new();
    let id = Uuid::new_v4();
    repo.expect_create_post().returning(move |_| Ok(id));

    let handler = PostHandler::new(repo);
    let response = handler.create_post(valid_post_request("a-title")).await.unwrap();

    assert_eq!(response.id, id);
    assert_eq!(response.slug, "a-title");
}

// ───── Publish toggle ───────────────────────────────────────────────

#[tokio::test]
async fn toggling_publish_twice_restores_nullness() {
    let mut repo = MockPostRepo::new();
    repo.expect_set_published_at()
        .returning(|id, published_at| {
            let mut post = common::sample_post("a-title", false);
            post.id = *id;
            post.published_at = published_at;
            Ok(post)
        });

    let handler = PostHandler::new(repo);
    let id = Uuid::new_v4().to_string();

    let published = handler.toggle_publish(&id, true).await.unwrap();
    assert!(published.published_at.is_some());

    let unpublished = handler.toggle_publish(&id, false).await.unwrap();
    assert!(unpublished.published_at.is_none());
}

// ───── Public lookup semantics ──────────────────────────────────────

#[tokio::test]
async fn unpublished_slug_is_not_found_on_the_public_path() {
    let mut repo = MockPostRepo::new();
    repo.expect_get_post_by_slug()
        .withf(|slug, published_only| slug == "draft-post" && *published_only)
        .returning(|_, _| Err(AppError::NotFound("Record not found".into())));

    let handler = PostHandler::new(repo);
    let result = handler.get_published_post_by_slug("draft-post").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn malformed_ids_are_rejected_before_any_query() {
    let repo = MockPostRepo::new();
    let handler = PostHandler::new(repo);

    let result = handler.delete_post("not-a-uuid").await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}
