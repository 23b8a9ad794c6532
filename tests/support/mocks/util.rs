// tests/support/mocks/util.rs
use async_trait::async_trait;
use robotika_cms::application::{
    ApplicationResult,
    ports::storage::{FileStorage, UploadedFile},
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records stored files instead of touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    stored: Mutex<Vec<(String, usize)>>,
    uploads: AtomicUsize,
}

impl MemoryStorage {
    pub fn stored_paths(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl FileStorage for MemoryStorage {
    async fn store(&self, folder: &str, file: UploadedFile) -> ApplicationResult<String> {
        let ext = file.image_extension().unwrap_or("bin");
        let number = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let path = format!("{folder}/file-{number}.{ext}");
        self.stored.lock().unwrap().push((path.clone(), file.len()));
        Ok(path)
    }

    async fn remove(&self, path: &str) -> ApplicationResult<()> {
        self.stored.lock().unwrap().retain(|(stored, _)| stored != path);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("/uploads/{path}")
    }
}
