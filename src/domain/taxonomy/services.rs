// src/domain/taxonomy/services.rs
use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::slug::SlugChecker;
use crate::domain::taxonomy::{TaxonomyRepository, TermId, TermKind};

/// Slug existence check scoped to one taxonomy.
pub struct TermSlugChecker<'a> {
    repo: &'a dyn TaxonomyRepository,
    kind: TermKind,
    exclude: Option<TermId>,
}

impl<'a> TermSlugChecker<'a> {
    pub fn new(repo: &'a dyn TaxonomyRepository, kind: TermKind, exclude: Option<TermId>) -> Self {
        Self {
            repo,
            kind,
            exclude,
        }
    }
}

#[async_trait]
impl SlugChecker for TermSlugChecker<'_> {
    async fn is_taken(&self, slug: &str) -> DomainResult<bool> {
        self.repo.slug_taken(self.kind, slug, self.exclude).await
    }
}
