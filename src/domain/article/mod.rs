pub mod entity;
pub mod publishing;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;
pub mod views;

pub use entity::{Article, ArticleUpdate, NewArticle, normalize_tag_ids};
pub use publishing::{PublishState, apply_publish_transition};
pub use repository::{
    ArticleListQuery, ArticleReadRepository, ArticleSortField, ArticleWriteRepository,
    StatusFilter,
};
pub use value_objects::{ArticleBody, ArticleExcerpt, ArticleId, ArticleSlug, ArticleTitle};
pub use views::{VIEW_MARKER_TTL_SECS, ViewDecision, record_view};
