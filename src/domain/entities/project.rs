use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    entities::post::{normalize_url_field, validate_optional_url, validate_slug},
    errors::AppError,
    utils::markdown::safe_markdown_to_html,
};

/// The three portfolio categories. Stored as TEXT and constrained both
/// here and by a CHECK on the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "WEB")]
    Web,
    #[serde(rename = "LLM")]
    Llm,
    #[serde(rename = "AIVIDEO")]
    AiVideo,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectType::Web => "WEB",
            ProjectType::Llm => "LLM",
            ProjectType::AiVideo => "AIVIDEO",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ProjectType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEB" => Ok(ProjectType::Web),
            "LLM" => Ok(ProjectType::Llm),
            "AIVIDEO" => Ok(ProjectType::AiVideo),
            other => Err(AppError::InvalidInput(format!("Unknown project type: {}", other))),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

/// Raw row shape; `project_type` stays TEXT until converted.
#[derive(Debug, sqlx::FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub project_type: String,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub video_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub content_mdx: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub video_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub content_mdx: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = AppError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Project {
            id: row.id,
            title: row.title,
            slug: row.slug,
            summary: row.summary,
            project_type: row.project_type.parse()?,
            tech_stack: row.tech_stack,
            repo_url: row.repo_url,
            live_url: row.live_url,
            video_url: row.video_url,
            cover_image_url: row.cover_image_url,
            content_mdx: row.content_mdx,
            featured: row.featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Validate)]
pub struct ProjectInsert {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,

    pub project_type: ProjectType,
    pub tech_stack: Vec<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub video_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub content_mdx: Option<String>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub content_html: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCreatedResponse {
    pub id: Uuid,
    pub slug: String,
}

// ───── Input & Validation Requests ──────────────────────────────────

/// Full payload for create and update alike; updates replace the row.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewProjectRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[validate(length(min = 1, message = "Summary is required"))]
    pub summary: String,

    #[serde(rename = "type")]
    pub project_type: ProjectType,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub repo_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub live_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub video_url: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub cover_image_url: Option<String>,

    #[serde(default)]
    pub content_mdx: Option<String>,

    #[serde(default)]
    pub featured: bool,
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let now = Utc::now();
        let insert = ProjectInsert {
            title: value.title,
            slug: value.slug,
            summary: value.summary,
            project_type: value.project_type,
            tech_stack: value.tech_stack,
            repo_url: normalize_url_field(value.repo_url),
            live_url: normalize_url_field(value.live_url),
            video_url: normalize_url_field(value.video_url),
            cover_image_url: normalize_url_field(value.cover_image_url),
            content_mdx: value.content_mdx.filter(|c| !c.is_empty()),
            featured: value.featured,
            created_at: now,
            updated_at: now,
        };

        insert.validate()?;
        Ok(insert)
    }
}

impl Project {
    pub fn to_detail_response(&self) -> ProjectDetailResponse {
        ProjectDetailResponse {
            content_html: self.content_mdx.as_deref().map(safe_markdown_to_html),
            project: self.clone(),
        }
    }
}
