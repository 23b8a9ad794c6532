// src/infrastructure/storage.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::storage::{FileStorage, UploadedFile},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Writes uploads below a root directory that is served statically.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

async fn write_file(directory: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(directory).await?;
    let mut handle = tokio::fs::File::create(target).await?;
    handle.write_all(bytes).await?;
    handle.flush().await
}

async fn remove_file(target: &Path) -> std::io::Result<()> {
    match tokio::fs::remove_file(target).await {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

/// Storage paths are relative and never climb out of the root.
fn checked_relative(path: &str) -> ApplicationResult<&str> {
    let path = path.trim_matches('/');
    if path.split('/').any(|part| part.is_empty() || part == "." || part == "..") {
        return Err(ApplicationError::infrastructure(format!(
            "invalid storage path '{path}'"
        )));
    }
    Ok(path)
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(&self, folder: &str, file: UploadedFile) -> ApplicationResult<String> {
        let extension = file
            .image_extension()
            .ok_or_else(|| ApplicationError::validation("unsupported file type"))?;
        let folder = checked_relative(folder)?;

        let directory = self.root.join(folder);
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let target = directory.join(&file_name);
        if let Err(err) = write_file(&directory, &target, &file.bytes).await {
            tracing::error!(error = %err, path = %target.display(), "failed to write upload");
            if let Err(cleanup) = remove_file(&target).await {
                tracing::warn!(error = %cleanup, path = %target.display(), "partial upload left behind");
            }
            return Err(err.into());
        }

        Ok(format!("{folder}/{file_name}"))
    }

    async fn remove(&self, path: &str) -> ApplicationResult<()> {
        let target = self.root.join(checked_relative(path)?);
        remove_file(&target).await?;
        tracing::debug!(path = %target.display(), "stored file removed");
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url, path.trim_start_matches('/'))
    }
}
