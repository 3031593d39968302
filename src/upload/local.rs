// Local-disk fallback for non-hosted deployments: one flat file per upload,
// served under the /uploads static path.
use std::path::PathBuf;

use async_trait::async_trait;

use super::{ImageHost, UploadError, UploadedImage};

pub struct LocalDiskHost {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskHost {
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ImageHost for LocalDiskHost {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        id: &str,
    ) -> Result<UploadedImage, UploadError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;

        let size = bytes.len() as u64;
        tokio::fs::write(dir.join(id), bytes).await?;

        Ok(UploadedImage {
            url: format!("{}/uploads/{}/{}", self.public_base_url, folder, id),
            public_id: format!("{}/{}", folder, id),
            format: None,
            width: None,
            height: None,
            bytes: Some(size),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), UploadError> {
        let path = self.root.join(public_id);
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("portfolio-api-test-{}", Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn upload_writes_file_and_builds_url() {
        let root = temp_root();
        let host = LocalDiskHost::new(root.clone(), "http://127.0.0.1:8000");

        let image = host
            .upload(b"png-bytes".to_vec(), "images", "abc.png")
            .await
            .unwrap();

        assert_eq!(image.url, "http://127.0.0.1:8000/uploads/images/abc.png");
        assert_eq!(image.bytes, Some(9));
        let stored = tokio::fs::read(root.join("images/abc.png")).await.unwrap();
        assert_eq!(stored, b"png-bytes");

        host.delete("images/abc.png").await.unwrap();
        assert!(!root.join("images/abc.png").exists());
        // Deleting again is a no-op.
        host.delete("images/abc.png").await.unwrap();

        let _ = tokio::fs::remove_dir_all(root).await;
    }
}
