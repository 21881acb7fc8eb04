use anyhow::{Context, Result};
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::region::Region;
use s3::Bucket;
use tracing::debug;

use crate::settings::StorageConfig;

/// Write path to the media bucket. Implementations hold service-level
/// credentials; request-scoped sessions never see them.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn exists(&self, filename: &str) -> Result<bool>;
    async fn put(&self, filename: &str, bytes: &[u8], content_type: &str) -> Result<()>;
    fn public_url(&self, filename: &str) -> String;
}

#[derive(Clone)]
pub struct S3MediaStore {
    bucket: Box<Bucket>,
    public_base_url: Option<String>,
}

impl S3MediaStore {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .context("Failed to create storage credentials")?;

        let region = if let Some(ref endpoint) = config.endpoint {
            Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            }
        } else {
            config.region.parse().unwrap_or(Region::UsEast1)
        };

        let mut bucket = Bucket::new(&config.bucket, region, credentials)
            .context("Failed to create storage bucket handle")?;

        // Path-style for custom endpoints (MinIO, R2, Supabase storage)
        if config.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        bucket.add_header("cache-control", "max-age=3600");

        Ok(Self {
            bucket,
            public_base_url: config.public_base_url.clone(),
        })
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn exists(&self, filename: &str) -> Result<bool> {
        match self.bucket.head_object(filename).await {
            Ok(_) => Ok(true),
            Err(s3::error::S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(s3::error::S3Error::HttpFail) => Ok(false),
            Err(e) => Err(anyhow::anyhow!("Storage head request failed: {e}")),
        }
    }

    async fn put(&self, filename: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        debug!(key = %filename, content_type = %content_type, "Uploading bytes to media bucket");

        self.bucket
            .put_object_with_content_type(filename, bytes, content_type)
            .await
            .context("Failed to upload bytes to media bucket")?;

        Ok(())
    }

    fn public_url(&self, filename: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), filename),
            None => format!("https://{}.s3.amazonaws.com/{}", self.bucket.name(), filename),
        }
    }
}
