// src/application/ports/storage.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;

/// An uploaded binary together with its declared media type.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Bytes,
    pub content_type: String,
}

impl UploadedFile {
    pub fn new(bytes: Bytes, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// File extension for the accepted image types, `None` for anything else.
    pub fn image_extension(&self) -> Option<&'static str> {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/png" => Some("png"),
            "image/gif" => Some("gif"),
            "image/webp" => Some("webp"),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persists `file` under the logical `folder` and returns the stored path,
    /// relative to the storage root.
    async fn store(&self, folder: &str, file: UploadedFile) -> ApplicationResult<String>;

    /// Deletes a previously stored path. A path that is already gone is not an error.
    async fn remove(&self, path: &str) -> ApplicationResult<()>;

    /// Public URL for a stored path.
    fn public_url(&self, path: &str) -> String;
}
