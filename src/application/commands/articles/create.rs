// src/application/commands/articles/create.rs
use super::{ArticleCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::ApplicationResult,
    },
    domain::{
        article::{ArticleBody, ArticleExcerpt, ArticleTitle, NewArticle, PublishState},
        slug::SLUG_WRITE_ATTEMPTS,
    },
};

#[derive(Debug, Clone, Default)]
pub struct CreateArticleCommand {
    pub title: String,
    /// Explicit address; derived from the title when absent or blank.
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: String,
    pub category_id: Option<i64>,
    pub tag_ids: Vec<i64>,
    pub publish: bool,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    slug: Option<String>,
    excerpt: Option<String>,
    body: Option<String>,
    category_id: Option<i64>,
    tag_ids: Vec<i64>,
    publish: bool,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn tags(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }

    pub fn publish(mut self, publish: bool) -> Self {
        self.publish = publish;
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            slug: self.slug,
            excerpt: self.excerpt,
            body: self.body.ok_or("body is required")?,
            category_id: self.category_id,
            tag_ids: self.tag_ids,
            publish: self.publish,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        actor: &Actor,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        ensure_capability(actor, "articles", "create")?;
        if command.publish {
            ensure_capability(actor, "articles", "publish")?;
        }

        let title = ArticleTitle::new(command.title)?;
        let body = ArticleBody::new(command.body)?;
        let excerpt = ArticleExcerpt::parse(command.excerpt);
        let category_id = self.resolve_category(command.category_id).await?;
        let tag_ids = self.resolve_tags(command.tag_ids).await?;
        let now = self.clock.now();
        let publish_state = PublishState::draft().transition(command.publish, now);
        let author_id = actor.author_id(self.settings.system_user);

        let mut attempt = 1;
        loop {
            let slug = self
                .slug_service
                .generate_unique_slug(command.slug.as_deref(), &title, None, now)
                .await?;

            let new_article = NewArticle {
                title: title.clone(),
                slug,
                excerpt: excerpt.clone(),
                body: body.clone(),
                cover_image_path: None,
                category_id,
                tag_ids: tag_ids.clone(),
                author_id,
                published: publish_state.published,
                published_at: publish_state.published_at,
                created_at: now,
                updated_at: now,
            };

            match self.write_repo.insert(new_article).await {
                Ok(created) => {
                    tracing::info!(
                        article_id = created.id.0,
                        slug = created.slug.as_str(),
                        author_id = created.author_id.0,
                        published = created.published,
                        "article created"
                    );
                    return Ok(created.into());
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
