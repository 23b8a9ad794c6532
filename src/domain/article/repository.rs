use crate::domain::article::entity::{Article, ArticleUpdate, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug};
use crate::domain::errors::DomainResult;
use crate::domain::listing::{Page, PageRequest, SortDirection};
use crate::domain::taxonomy::TermId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleSortField {
    #[default]
    CreatedAt,
    PublishedAt,
    Title,
    ViewCount,
}

impl ArticleSortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created_at" => Some(Self::CreatedAt),
            "published_at" => Some(Self::PublishedAt),
            "title" => Some(Self::Title),
            "view_count" => Some(Self::ViewCount),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::PublishedAt => "published_at",
            Self::Title => "title",
            Self::ViewCount => "view_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Published,
    Draft,
    All,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "published" => Some(Self::Published),
            "draft" => Some(Self::Draft),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::All => "all",
        }
    }

    pub fn matches(&self, published: bool) -> bool {
        match self {
            Self::Published => published,
            Self::Draft => !published,
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArticleListQuery {
    pub search: Option<String>,
    pub category_id: Option<TermId>,
    pub tag_id: Option<TermId>,
    pub status: StatusFilter,
    /// List soft-deleted articles instead of live ones.
    pub trashed: bool,
    pub order_by: ArticleSortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Fails with `DomainError::SlugConflict` when another live article owns the slug.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Applies the update only if `original_updated_at` still matches.
    async fn update(&self, update: ArticleUpdate) -> DomainResult<Article>;
    async fn soft_delete(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<()>;
    async fn restore(&self, id: ArticleId, at: DateTime<Utc>) -> DomainResult<Article>;
    /// Atomic `+1` at the storage layer; returns the new count.
    async fn increment_view_count(&self, id: ArticleId) -> DomainResult<u64>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    /// Includes soft-deleted rows; callers decide visibility.
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    /// Live articles only.
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    async fn slug_taken(&self, slug: &str, exclude: Option<ArticleId>) -> DomainResult<bool>;
    async fn list(&self, query: ArticleListQuery) -> DomainResult<Page<Article>>;
}
