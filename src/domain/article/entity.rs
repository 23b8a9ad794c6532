// src/domain/article/entity.rs
use crate::domain::article::publishing::PublishState;
use crate::domain::article::value_objects::{
    ArticleBody, ArticleExcerpt, ArticleId, ArticleSlug, ArticleTitle,
};
use crate::domain::taxonomy::TermId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub excerpt: Option<ArticleExcerpt>,
    pub body: ArticleBody,
    pub cover_image_path: Option<String>,
    pub category_id: Option<TermId>,
    pub tag_ids: Vec<TermId>,
    pub author_id: UserId,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn publish_state(&self) -> PublishState {
        PublishState::new(self.published, self.published_at)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Sorts and deduplicates tag references; tags form an unordered set.
pub fn normalize_tag_ids(mut ids: Vec<TermId>) -> Vec<TermId> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: ArticleTitle,
    pub slug: ArticleSlug,
    pub excerpt: Option<ArticleExcerpt>,
    pub body: ArticleBody,
    pub cover_image_path: Option<String>,
    pub category_id: Option<TermId>,
    pub tag_ids: Vec<TermId>,
    pub author_id: UserId,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ArticleUpdate {
    pub id: ArticleId,
    pub title: Option<ArticleTitle>,
    pub slug: Option<ArticleSlug>,
    pub excerpt: Option<Option<ArticleExcerpt>>,
    pub body: Option<ArticleBody>,
    pub cover_image_path: Option<Option<String>>,
    pub category_id: Option<Option<TermId>>,
    pub tag_ids: Option<Vec<TermId>>,
    pub publish_state: Option<PublishState>,
    pub original_updated_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArticleUpdate {
    pub fn new(id: ArticleId, original_updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            excerpt: None,
            body: None,
            cover_image_path: None,
            category_id: None,
            tag_ids: None,
            publish_state: None,
            original_updated_at,
            updated_at: original_updated_at,
        }
    }

    pub fn with_title(mut self, title: ArticleTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ArticleSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_excerpt(mut self, excerpt: Option<ArticleExcerpt>) -> Self {
        self.excerpt = Some(excerpt);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_cover_image(mut self, path: Option<String>) -> Self {
        self.cover_image_path = Some(path);
        self
    }

    pub fn with_category(mut self, category_id: Option<TermId>) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<TermId>) -> Self {
        self.tag_ids = Some(normalize_tag_ids(tag_ids));
        self
    }

    pub fn with_publish_state(mut self, state: PublishState) -> Self {
        self.publish_state = Some(state);
        self
    }

    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) {
        self.updated_at = updated_at;
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.excerpt.is_none()
            && self.body.is_none()
            && self.cover_image_path.is_none()
            && self.category_id.is_none()
            && self.tag_ids.is_none()
            && self.publish_state.is_none()
    }
}
