// src/application/commands/articles/delete.rs
use super::{ArticleCommandService, capability::ensure_owns_or_any};
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

#[derive(Debug, Clone, Copy)]
pub struct DeleteArticleCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct RestoreArticleCommand {
    pub id: i64,
}

impl ArticleCommandService {
    /// Soft delete: the row stays and its slug becomes reusable.
    pub async fn delete_article(
        &self,
        actor: &Actor,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let id = ArticleId::new(command.id)?;
        let article = self.load_live(id).await?;
        ensure_owns_or_any(actor, &article, "delete")?;

        self.write_repo.soft_delete(article.id, self.clock.now()).await?;
        tracing::info!(article_id = article.id.0, "article moved to trash");
        Ok(())
    }

    /// Fails with a slug conflict when a live article took the slug meanwhile.
    pub async fn restore_article(
        &self,
        actor: &Actor,
        command: RestoreArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        if !article.is_deleted() {
            return Err(ApplicationError::conflict("article is not deleted"));
        }
        ensure_owns_or_any(actor, &article, "restore")?;

        let restored = self.write_repo.restore(article.id, self.clock.now()).await?;
        tracing::info!(article_id = restored.id.0, "article restored");
        Ok(restored.into())
    }
}
