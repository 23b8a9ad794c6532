// src/application/commands/articles/update.rs
use super::{
    ArticleCommandService,
    capability::{ensure_capability, ensure_owns_or_any},
};
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleBody, ArticleExcerpt, ArticleId, ArticleTitle, ArticleUpdate},
        slug::SLUG_WRITE_ATTEMPTS,
    },
};

/// Partial update. `None` leaves a field untouched; the nested options clear
/// the field when the inner value is `None`.
#[derive(Debug, Clone, Default)]
pub struct UpdateArticleCommand {
    pub id: i64,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub body: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub publish: Option<bool>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &Actor,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(command.id)?;
        let mut article = self.load_live(id).await?;
        ensure_owns_or_any(actor, &article, "update")?;

        let now = self.clock.now();
        let mut update = ArticleUpdate::new(article.id, article.updated_at);

        let new_title = command.title.map(ArticleTitle::new).transpose()?;
        let title_changed = new_title
            .as_ref()
            .is_some_and(|title| title.as_str() != article.title.as_str());
        if let Some(title) = new_title {
            update = update.with_title(title.clone());
            article.title = title;
        }
        if let Some(body) = command.body {
            update = update.with_body(ArticleBody::new(body)?);
        }
        if let Some(excerpt) = command.excerpt {
            update = update.with_excerpt(ArticleExcerpt::parse(excerpt));
        }
        if let Some(category) = command.category_id {
            update = update.with_category(self.resolve_category(category).await?);
        }
        if let Some(tags) = command.tag_ids {
            update = update.with_tags(self.resolve_tags(tags).await?);
        }
        if let Some(requested) = command.publish {
            if requested != article.published {
                ensure_capability(actor, "articles", "publish")?;
            }
            let next = article.publish_state().transition(requested, now);
            if next != article.publish_state() {
                update = update.with_publish_state(next);
            }
        }

        let slug_candidate = command.slug.filter(|slug| !slug.trim().is_empty());
        let reslug = slug_candidate.is_some() || title_changed;

        if update.is_empty() && !reslug {
            return Ok(article.into());
        }
        update.set_updated_at(now);

        let mut attempt = 1;
        loop {
            let mut attempt_update = update.clone();
            if reslug {
                let slug = self
                    .slug_service
                    .generate_unique_slug(slug_candidate.as_deref(), &article.title, Some(id), now)
                    .await?;
                if slug != article.slug {
                    attempt_update = attempt_update.with_slug(slug);
                }
            }
            if attempt_update.is_empty() {
                return Ok(article.into());
            }

            match self.write_repo.update(attempt_update).await {
                Ok(updated) => {
                    tracing::info!(
                        article_id = updated.id.0,
                        slug = updated.slug.as_str(),
                        "article updated"
                    );
                    return Ok(updated.into());
                }
                Err(err) if err.is_slug_conflict() && attempt < SLUG_WRITE_ATTEMPTS => {
                    tracing::warn!(attempt, error = %err, "slug taken concurrently, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

