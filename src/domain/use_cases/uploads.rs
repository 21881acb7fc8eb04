use chrono::Utc;
use tracing::info;

use crate::{
    constants::{ALLOWED_IMAGE_TYPES, MAX_UPLOAD_BYTES},
    entities::upload::UploadResponse,
    errors::UploadError,
    storage::MediaStore,
    utils::filename::storage_filename,
};

pub struct UploadHandler<S>
where
    S: MediaStore,
{
    pub store: S,
}

impl<S> UploadHandler<S>
where
    S: MediaStore,
{
    pub fn new(store: S) -> Self {
        UploadHandler { store }
    }

    /// Validates and stores one image, returning its public location.
    /// The caller has already passed the admin gate.
    pub async fn upload(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
        declared_type: &str,
    ) -> Result<UploadResponse, UploadError> {
        validate_content_type(declared_type, &bytes)?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }

        let filename = storage_filename(original_name, Utc::now().timestamp_millis());

        // Never clobber: a name collision is a hard failure.
        let exists = self.store
            .exists(&filename)
            .await
            .map_err(|e| UploadError::StorageFailure(e.to_string()))?;
        if exists {
            return Err(UploadError::StorageFailure(format!(
                "Object {} already exists", filename
            )));
        }

        self.store
            .put(&filename, &bytes, declared_type)
            .await
            .map_err(|e| UploadError::StorageFailure(e.to_string()))?;

        info!(filename = %filename, size = bytes.len(), "Image uploaded");

        Ok(UploadResponse {
            url: self.store.public_url(&filename),
            filename,
            size: bytes.len(),
            content_type: declared_type.to_string(),
        })
    }
}

/// Declared MIME type must be allow-listed. Content sniffing is tolerant:
/// an undetectable payload (notably SVG) passes on its declared type, but
/// a detectable payload must itself be an allowed image format.
pub fn validate_content_type(declared: &str, bytes: &[u8]) -> Result<(), UploadError> {
    if !ALLOWED_IMAGE_TYPES.contains(&declared) {
        return Err(UploadError::InvalidType);
    }

    if let Some(kind) = infer::get(bytes) {
        if !ALLOWED_IMAGE_TYPES.contains(&kind.mime_type()) {
            return Err(UploadError::InvalidType);
        }
    }

    Ok(())
}
