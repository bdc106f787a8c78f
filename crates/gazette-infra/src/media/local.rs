//! Local filesystem implementation of `MediaStore`.
//!
//! Files land in a single uploads directory under a generated
//! `post-<unix-millis>-<random><ext>` name and are served statically under
//! the configured URL prefix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use gazette_core::ports::{MAX_IMAGE_BYTES, MediaError, MediaStore};

pub struct LocalMediaStore {
    /// Root directory for all uploads (e.g. "./uploads").
    root: PathBuf,
    /// Public URL prefix (e.g. "/uploads").
    url_prefix: String,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf, url_prefix: impl Into<String>) -> Self {
        Self {
            root,
            url_prefix: url_prefix.into(),
        }
    }

    /// Collision-resistant file name keeping the original extension.
    fn generate_name(original_name: &str) -> String {
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        format!(
            "post-{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            ext
        )
    }

    /// Resolve a public path back to a file inside the uploads directory.
    fn resolve(&self, public_path: &str) -> Result<PathBuf, MediaError> {
        let name = public_path
            .strip_prefix(&self.url_prefix)
            .map(|rest| rest.trim_start_matches('/'))
            .ok_or_else(|| MediaError::InvalidPath(public_path.to_string()))?;

        // A stored name never contains a separator; anything else is a
        // traversal attempt.
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return Err(MediaError::InvalidPath(public_path.to_string()));
        }

        Ok(self.root.join(name))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save_image(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<String, MediaError> {
        match content_type {
            Some(mime) if mime.starts_with("image/") => {}
            other => {
                return Err(MediaError::NotAnImage(
                    other.unwrap_or("unknown").to_string(),
                ));
            }
        }

        if data.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::TooLarge {
                size: data.len(),
                max: MAX_IMAGE_BYTES,
            });
        }

        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        let name = Self::generate_name(original_name);
        let target = self.root.join(&name);
        fs::write(&target, &data)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        tracing::debug!(file = %name, bytes = data.len(), "Stored uploaded image");

        Ok(format!("{}/{}", self.url_prefix, name))
    }

    async fn delete(&self, public_path: &str) -> Result<(), MediaError> {
        let target = self.resolve(public_path)?;

        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> LocalMediaStore {
        LocalMediaStore::new(dir.path().to_path_buf(), "/uploads")
    }

    #[tokio::test]
    async fn test_save_and_delete_image() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let path = store
            .save_image("cover.PNG", Some("image/png"), vec![1, 2, 3])
            .await
            .unwrap();

        assert!(path.starts_with("/uploads/post-"));
        assert!(path.ends_with(".png"));

        let on_disk = dir.path().join(path.strip_prefix("/uploads/").unwrap());
        assert!(on_disk.exists());

        store.delete(&path).await.unwrap();
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();

        store(&dir).delete("/uploads/post-gone.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();

        let err = store(&dir)
            .save_image("notes.txt", Some("text/plain"), vec![1])
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::NotAnImage(_)));
    }

    #[tokio::test]
    async fn test_rejects_oversized_payload() {
        let dir = tempfile::tempdir().unwrap();

        let err = store(&dir)
            .save_image("big.jpg", Some("image/jpeg"), vec![0; MAX_IMAGE_BYTES + 1])
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::TooLarge { .. }));
    }

    #[tokio::test]
    async fn test_rejects_traversal_on_delete() {
        let dir = tempfile::tempdir().unwrap();

        let err = store(&dir)
            .delete("/uploads/../secrets.txt")
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::InvalidPath(_)));
    }
}
