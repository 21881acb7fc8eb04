use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::{markdown::safe_markdown_to_html, reading_time::estimate_reading_minutes};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content_mdx: String,
    pub tags: Vec<String>,
    pub reading_minutes: i32,
    pub cover_image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// A post is live iff it carries a publish timestamp.
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

#[derive(Debug, Validate)]
pub struct PostInsert {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Excerpt is required"))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content_mdx: String,

    pub tags: Vec<String>,

    #[validate(range(min = 0, message = "Reading minutes must be non-negative"))]
    pub reading_minutes: i32,

    #[validate(custom(function = "validate_optional_url"))]
    pub cover_image_url: Option<String>,

    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub reading_minutes: i32,
    pub cover_image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content_mdx: String,
    pub content_html: String,
    pub tags: Vec<String>,
    pub reading_minutes: i32,
    pub cover_image_url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub id: Uuid,
    pub slug: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Full payload for create and update alike; updates replace the row.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewPostRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Excerpt is required"))]
    pub excerpt: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content_mdx: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub cover_image_url: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Reading minutes must be non-negative"))]
    pub reading_minutes: i32,

    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TogglePublishRequest {
    pub published: bool,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(new_validation_error("slug_empty", "Slug is required"));
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(new_validation_error(
            "slug_invalid_chars",
            "Slug must be lowercase with hyphens",
        ));
    }
    Ok(())
}

/// Accepts absent and empty-string values; anything else must be an
/// http(s) URL. Empty strings are normalized away before insert.
pub fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Ok(());
    }
    validate_url(url)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

/// Empty URL strings from form payloads mean "no value".
pub(crate) fn normalize_url_field(field: Option<String>) -> Option<String> {
    field.filter(|u| !u.is_empty())
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewPostRequest> for PostInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewPostRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let reading_minutes = if value.reading_minutes == 0 {
            estimate_reading_minutes(&value.content_mdx)
        } else {
            value.reading_minutes
        };

        let now = Utc::now();
        let insert = PostInsert {
            title: value.title,
            slug: value.slug,
            excerpt: value.excerpt,
            content_mdx: value.content_mdx,
            tags: value.tags,
            reading_minutes,
            cover_image_url: normalize_url_field(value.cover_image_url),
            published_at: value.published_at,
            created_at: now,
            updated_at: now,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl Post {
    pub fn to_list_response(&self) -> PostListResponse {
        PostListResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
            reading_minutes: self.reading_minutes,
            cover_image_url: self.cover_image_url.clone(),
            published_at: self.published_at,
            created_at: self.created_at,
        }
    }

    pub fn to_detail_response(&self) -> PostDetailResponse {
        PostDetailResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            excerpt: self.excerpt.clone(),
            content_html: safe_markdown_to_html(&self.content_mdx),
            content_mdx: self.content_mdx.clone(),
            tags: self.tags.clone(),
            reading_minutes: self.reading_minutes,
            cover_image_url: self.cover_image_url.clone(),
            published_at: self.published_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
