//! Multipart form for post create/update.

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use gazette_core::domain::PostDraft;
use gazette_core::ports::MediaStore;

use crate::middleware::error::{AppError, AppResult};

/// The editor's multipart payload: the editable post fields plus an optional
/// image under the `image` field.
#[derive(MultipartForm)]
pub struct PostForm {
    pub title: Text<String>,
    pub excerpt: Text<String>,
    pub content: Text<String>,
    pub category: Text<String>,
    #[multipart(rename = "readTime")]
    pub read_time: Text<String>,
    #[multipart(limit = "5MiB")]
    pub image: Option<TempFile>,
}

fn required(value: &str, field: &str) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

impl PostForm {
    /// Validate the text fields into a draft. Every field is required; the
    /// category must be one of the fixed set.
    pub fn draft(&self) -> AppResult<PostDraft> {
        let category = required(&self.category, "category")?
            .parse()
            .map_err(AppError::from)?;

        Ok(PostDraft {
            title: required(&self.title, "title")?,
            excerpt: required(&self.excerpt, "excerpt")?,
            content: required(&self.content, "content")?,
            category,
            read_time: required(&self.read_time, "readTime")?,
        })
    }

    /// Persist the attached image, if any, and return its public path.
    pub async fn store_image(&self, media: &dyn MediaStore) -> AppResult<Option<String>> {
        let Some(file) = &self.image else {
            return Ok(None);
        };

        let data = tokio::fs::read(file.file.path())
            .await
            .map_err(|e| AppError::Internal(format!("failed to read upload: {e}")))?;

        let name = file.file_name.as_deref().unwrap_or_default();
        let content_type = file.content_type.as_ref().map(|m| m.essence_str());

        let path = media.save_image(name, content_type, data).await?;
        Ok(Some(path))
    }
}
