use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use sqlx::{self, PgPool, QueryBuilder};

use crate::{
    entities::post::{Post, PostInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxPostRepo,
};

/// Optional case-insensitive filters applied by the public listing.
#[derive(Debug, Default, Clone)]
pub struct PostFilter {
    pub search: Option<String>,
    pub tag: Option<String>,
}

#[async_trait]
pub trait PostRepository: Sync + Send {
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

impl SqlxPostRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxPostRepo { pool }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some("posts_slug_key") {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl PostRepository for SqlxPostRepo {
    async fn create_post(&self, post: &PostInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO posts (
                title, slug, excerpt, content_mdx, tags, reading_minutes,
                cover_image_url, published_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content_mdx)
        .bind(&post.tags)
        .bind(post.reading_minutes)
        .bind(&post.cover_image_url)
        .bind(post.published_at)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(id)
    }

    async fn get_post_by_id(&self, id: &Uuid) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(post)
    }

    async fn get_post_by_slug(&self, slug: &str, published_only: bool) -> Result<Post, AppError> {
        // An unpublished slug is indistinguishable from a missing one on
        // the public path.
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE slug = $1
              AND ($2::boolean IS FALSE OR published_at IS NOT NULL)
            "#,
        )
        .bind(slug)
        .bind(published_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update_post(&self, id: &Uuid, post: &PostInsert) -> Result<Post, AppError> {
        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET
                title = $1,
                slug = $2,
                excerpt = $3,
                content_mdx = $4,
                tags = $5,
                reading_minutes = $6,
                cover_image_url = $7,
                published_at = $8,
                updated_at = NOW()
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.excerpt)
        .bind(&post.content_mdx)
        .bind(&post.tags)
        .bind(post.reading_minutes)
        .bind(&post.cover_image_url)
        .bind(post.published_at)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(updated)
    }

    async fn set_published_at(&self, id: &Uuid, published_at: Option<DateTime<Utc>>) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET
                published_at = $1,
                updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(published_at)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_posts(&self, published_only: bool, filter: &PostFilter) -> Result<Vec<Post>, AppError> {
        let mut builder = QueryBuilder::new("SELECT * FROM posts WHERE TRUE");

        if published_only {
            builder.push(" AND published_at IS NOT NULL");
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search);
            builder.push(" AND (title ILIKE ").push_bind(pattern.clone());
            builder.push(" OR excerpt ILIKE ").push_bind(pattern.clone());
            builder.push(" OR content_mdx ILIKE ").push_bind(pattern);
            builder.push(")");
        }

        if let Some(tag) = filter.tag.as_deref().filter(|t| !t.is_empty()) {
            builder.push(" AND EXISTS (SELECT 1 FROM unnest(tags) AS t WHERE t ILIKE ");
            builder.push_bind(format!("%{}%", tag));
            builder.push(")");
        }

        if published_only {
            builder.push(" ORDER BY published_at DESC NULLS LAST");
        } else {
            builder.push(" ORDER BY created_at DESC");
        }

        let query = builder.build_query_as::<Post>();
        let posts: Vec<Post> = query.fetch_all(&self.pool).await?;

        Ok(posts)
    }

    async fn recent_posts(&self, limit: u32) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE published_at IS NOT NULL
            ORDER BY published_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_posts(&self, published_only: bool) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE ($1::boolean IS FALSE OR published_at IS NOT NULL)
            "#,
        )
        .bind(published_only)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn delete_post(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Post not found".into()));
        }

        Ok(())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
