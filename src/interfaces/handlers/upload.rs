use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::UploadError, use_cases::extractors::AuthClaims, AppState};

/// Multipart envelope for `POST /api/upload`. The transport limit sits
/// above the 5 MiB validation ceiling so oversized files get the size
/// error, not a generic multipart rejection.
#[derive(Debug, MultipartForm)]
pub struct UploadForm {
    #[multipart(rename = "file", limit = "10MB")]
    pub file: Option<TempFile>,
}

#[instrument(skip(claims, state, form))]
pub async fn upload_image(
    claims: AuthClaims,
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> Result<impl Responder, UploadError> {
    // The endpoint re-checks the admin identity itself; a session with a
    // different email is unauthorized, not merely forbidden.
    if !state.auth_handler.is_admin_email(&claims.0.email) {
        return Err(UploadError::Unauthorized);
    }

    let upload_handler = state
        .upload_handler
        .as_ref()
        .ok_or(UploadError::NotConfigured)?;

    let file = form.file.ok_or(UploadError::MissingFile)?;

    let declared_type = file
        .content_type
        .as_ref()
        .map(|m| m.essence_str().to_string())
        .ok_or(UploadError::InvalidType)?;

    let original_name = file.file_name.clone().unwrap_or_else(|| "file".to_string());

    let bytes = tokio::fs::read(file.file.path())
        .await
        .map_err(|e| UploadError::StorageFailure(format!("Failed to read upload: {}", e)))?;

    let response = upload_handler.upload(&original_name, bytes, &declared_type).await?;

    Ok(HttpResponse::Ok().json(response))
}
