// src/application/commands/articles/publish.rs
use super::{
    ArticleCommandService,
    capability::{ensure_capability, ensure_owns_or_any},
};
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::ApplicationResult,
    },
    domain::article::{ArticleId, ArticleUpdate},
};

#[derive(Debug, Clone, Copy)]
pub struct SetPublishStateCommand {
    pub id: i64,
    pub publish: bool,
}

impl ArticleCommandService {
    pub async fn set_publish_state(
        &self,
        actor: &Actor,
        command: SetPublishStateCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "publish")?;

        let id = ArticleId::new(command.id)?;
        let article = self.load_live(id).await?;
        ensure_owns_or_any(actor, &article, "update")?;

        let now = self.clock.now();
        let current = article.publish_state();
        let next = current.transition(command.publish, now);
        if next == current {
            return Ok(article.into());
        }

        let mut update = ArticleUpdate::new(article.id, article.updated_at).with_publish_state(next);
        update.set_updated_at(now);
        let updated = self.write_repo.update(update).await?;

        tracing::info!(
            article_id = updated.id.0,
            published = updated.published,
            "article publish state changed"
        );
        Ok(updated.into())
    }
}
