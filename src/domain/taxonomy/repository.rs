// src/domain/taxonomy/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::listing::{Page, PageRequest, SortDirection};
use crate::domain::taxonomy::entity::{NewTerm, Term, TermId, TermKind, TermUpdate};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermSortField {
    #[default]
    Name,
    CreatedAt,
}

impl TermSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TermListQuery {
    pub kind: TermKind,
    pub search: Option<String>,
    pub order_by: TermSortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn insert(&self, term: NewTerm) -> DomainResult<Term>;
    async fn update(&self, update: TermUpdate) -> DomainResult<Term>;
    async fn delete(&self, kind: TermKind, id: TermId) -> DomainResult<()>;
    async fn find_by_id(&self, kind: TermKind, id: TermId) -> DomainResult<Option<Term>>;
    async fn slug_taken(
        &self,
        kind: TermKind,
        slug: &str,
        exclude: Option<TermId>,
    ) -> DomainResult<bool>;
    async fn list(&self, query: TermListQuery) -> DomainResult<Page<Term>>;
}
