// src/application/commands/articles/cover.rs
use super::{ArticleCommandService, capability::ensure_owns_or_any};
use crate::{
    application::{
        commands::uploads::validate_image,
        dto::{Actor, ArticleDto},
        error::ApplicationResult,
        ports::storage::UploadedFile,
    },
    domain::article::{ArticleId, ArticleUpdate},
};

const COVER_FOLDER: &str = "articles/covers";

pub struct AttachCoverImageCommand {
    pub id: i64,
    pub file: UploadedFile,
}

impl ArticleCommandService {
    pub async fn attach_cover_image(
        &self,
        actor: &Actor,
        command: AttachCoverImageCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let article = self.load_live(id).await?;
        ensure_owns_or_any(actor, &article, "update")?;
        validate_image(&command.file, self.settings.max_upload_bytes)?;

        let path = self.storage.store(COVER_FOLDER, command.file).await?;

        let mut update = ArticleUpdate::new(article.id, article.updated_at)
            .with_cover_image(Some(path.clone()));
        update.set_updated_at(self.clock.now());
        let updated = match self.write_repo.update(update).await {
            Ok(updated) => updated,
            Err(err) => {
                // The article never pointed at the new file.
                if let Err(cleanup) = self.storage.remove(&path).await {
                    tracing::warn!(error = %cleanup, path = %path, "orphaned cover image left behind");
                }
                return Err(err.into());
            }
        };

        tracing::info!(article_id = updated.id.0, "cover image attached");
        Ok(updated.into())
    }
}
