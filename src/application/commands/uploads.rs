// src/application/commands/uploads.rs
use std::sync::Arc;

use crate::application::{
    dto::{Actor, UploadDto},
    error::{ApplicationError, ApplicationResult},
    ports::storage::{FileStorage, UploadedFile},
};

const CONTENT_IMAGE_FOLDER: &str = "articles/content";

/// Rejects empty, oversized, and non-image payloads.
pub(crate) fn validate_image(file: &UploadedFile, max_bytes: usize) -> ApplicationResult<()> {
    if file.is_empty() {
        return Err(ApplicationError::validation("uploaded file is empty"));
    }
    if file.len() > max_bytes {
        return Err(ApplicationError::PayloadTooLarge { limit: max_bytes });
    }
    if file.image_extension().is_none() {
        return Err(ApplicationError::validation(format!(
            "unsupported image type '{}'",
            file.content_type
        )));
    }
    Ok(())
}

pub struct UploadCommandService {
    storage: Arc<dyn FileStorage>,
    max_upload_bytes: usize,
}

impl UploadCommandService {
    pub fn new(storage: Arc<dyn FileStorage>, max_upload_bytes: usize) -> Self {
        Self {
            storage,
            max_upload_bytes,
        }
    }

    /// Stores an image embedded in article content and returns its public URL.
    pub async fn upload_image(
        &self,
        actor: &Actor,
        file: UploadedFile,
    ) -> ApplicationResult<UploadDto> {
        if !actor.has_capability("uploads", "create") {
            return Err(ApplicationError::forbidden("missing capability uploads:create"));
        }
        validate_image(&file, self.max_upload_bytes)?;

        let path = self.storage.store(CONTENT_IMAGE_FOLDER, file).await?;
        let url = self.storage.public_url(&path);
        tracing::info!(path = %path, "content image stored");

        Ok(UploadDto {
            uploaded: true,
            path,
            url,
        })
    }
}
