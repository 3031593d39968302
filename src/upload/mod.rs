// Image hosting behind a narrow interface: hosted provider or local disk.
pub mod cloudinary;
pub mod local;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use cloudinary::CloudinaryHost;
pub use local::LocalDiskHost;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image host rejected upload: {0}")]
    Provider(String),

    #[error("local upload failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for crate::error::ApiError {
    fn from(err: UploadError) -> Self {
        tracing::error!("image upload failed: {}", err);
        crate::error::ApiError::unknown(format!("Upload failed: {}", err))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

/// External image host. `id` is the caller-generated unique name (it may
/// carry a file extension; hosts that key by bare id strip it).
#[async_trait]
pub trait ImageHost: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        id: &str,
    ) -> Result<UploadedImage, UploadError>;

    async fn delete(&self, public_id: &str) -> Result<(), UploadError>;
}
