use std::sync::Arc;

use crate::{
    application::dto::Actor,
    domain::article::{Article, ArticleReadRepository},
};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
}

impl ArticleQueryService {
    pub fn new(read_repo: Arc<dyn ArticleReadRepository>) -> Self {
        Self { read_repo }
    }

    /// Drafts are visible to their author and to holders of `articles:view:drafts`.
    pub(super) fn can_view(actor: Option<&Actor>, article: &Article) -> bool {
        if article.published {
            return true;
        }
        match actor {
            Some(Actor::System) => true,
            Some(Actor::User(user)) => {
                user.has_capability("articles", "view:drafts") || user.id == article.author_id
            }
            None => false,
        }
    }
}
