// src/domain/article/services/mod.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::article::repository::ArticleReadRepository;
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, ArticleTitle};
use crate::domain::errors::DomainResult;
use crate::domain::slug::{SlugChecker, SlugResolver};

/// Existence check over live articles, ignoring the article being edited.
pub struct ArticleSlugChecker<'a> {
    read_repo: &'a dyn ArticleReadRepository,
    exclude: Option<ArticleId>,
}

impl<'a> ArticleSlugChecker<'a> {
    pub fn new(read_repo: &'a dyn ArticleReadRepository, exclude: Option<ArticleId>) -> Self {
        Self { read_repo, exclude }
    }
}

#[async_trait]
impl SlugChecker for ArticleSlugChecker<'_> {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool> {
        self.read_repo.slug_taken(slug, self.exclude).await
    }
}

/// Domain service responsible for producing unique slugs for articles.
pub struct ArticleSlugService {
    read_repo: Arc<dyn ArticleReadRepository>,
    resolver: SlugResolver,
}

impl ArticleSlugService {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>, resolver: SlugResolver) -> Self {
        Self {
            read_repo,
            resolver,
        }
    }

    pub async fn generate_unique_slug(
        &self,
        candidate: Option<&str>,
        title: &ArticleTitle,
        ignore_id: Option<ArticleId>,
        now: DateTime<Utc>,
    ) -> DomainResult<ArticleSlug> {
        let checker = ArticleSlugChecker::new(self.read_repo.as_ref(), ignore_id);
        let slug = self
            .resolver
            .resolve(candidate, title.as_str(), "article", now, &checker)
            .await?;
        ArticleSlug::new(slug)
    }
}
