//! Media storage port - persistence of uploaded post images.

use async_trait::async_trait;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Storage for uploaded images.
///
/// Implementations persist the payload under a collision-resistant name and
/// return the public path it will be served from. File writes and record
/// writes are not transactional; callers compensate with a best-effort
/// `delete` when the record write fails.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist an image payload and return its public serving path.
    ///
    /// Rejects payloads that are not images or exceed [`MAX_IMAGE_BYTES`].
    async fn save_image(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        data: Vec<u8>,
    ) -> Result<String, MediaError>;

    /// Delete a previously stored image by its public path. Deleting a path
    /// that no longer resolves to a file is not an error.
    async fn delete(&self, public_path: &str) -> Result<(), MediaError>;
}

/// Media storage errors.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Only image files are allowed (got {0})")]
    NotAnImage(String),

    #[error("Image exceeds the {max} byte limit ({size} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("I/O failure: {0}")]
    Io(String),
}
