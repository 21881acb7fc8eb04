use chrono::Utc;

use crate::{
    entities::post::{NewPostRequest, Post, PostCreatedResponse, PostInsert},
    errors::AppError,
    repositories::post::{PostFilter, PostRepository},
    utils::valid_uuid::valid_uuid,
};

pub struct PostHandler<R>
where
    R: PostRepository,
{
    pub post_repo: R,
}

impl<R> PostHandler<R>
where
    R: PostRepository,
{
    pub fn new(post_repo: R) -> Self {
        PostHandler { post_repo }
    }

    /// Creates a new post. Validation happens before any repository call.
    pub async fn create_post(&self, request: NewPostRequest) -> Result<PostCreatedResponse, AppError> {
        let insert = PostInsert::try_from(request)?;
        let id = self.post_repo.create_post(&insert).await?;

        Ok(PostCreatedResponse { id, slug: insert.slug })
    }

    /// Retrieves a post by its ID (admin edit path, drafts included).
    pub async fn get_post_by_id(&self, post_id: &str) -> Result<Post, AppError> {
        let valid_id = valid_uuid(post_id)?;
        self.post_repo.get_post_by_id(&valid_id).await
    }

    /// Public lookup: drafts behave as missing.
    pub async fn get_published_post_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        self.post_repo
            .get_post_by_slug(slug, true)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Post not found".to_string()),
                _ => e,
            })
    }

    pub async fn list_posts(&self, published_only: bool, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        self.post_repo.list_posts(published_only, filter).await
    }

    pub async fn recent_posts(&self, limit: u32) -> Result<Vec<Post>, AppError> {
        self.post_repo.recent_posts(limit).await
    }

    pub async fn count_posts(&self, published_only: bool) -> Result<i64, AppError> {
        self.post_repo.count_posts(published_only).await
    }

    /// Replaces an existing post with the validated payload.
    pub async fn update_post(&self, id: &str, request: NewPostRequest) -> Result<Post, AppError> {
        let valid_id = valid_uuid(id)?;
        let insert = PostInsert::try_from(request)?;
        self.post_repo.update_post(&valid_id, &insert).await
    }

    /// Flips the publish state only: published_at becomes now or null,
    /// leaving the rest of the row untouched.
    pub async fn toggle_publish(&self, id: &str, published: bool) -> Result<Post, AppError> {
        let valid_id = valid_uuid(id)?;
        let published_at = published.then(Utc::now);
        self.post_repo.set_published_at(&valid_id, published_at).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.post_repo.delete_post(&valid_id).await
    }
}
