use std::collections::HashSet;

use crate::domain::article::entity::Article;
use crate::domain::user::value_objects::{Capability, UserId};

/// `articles:<action>:any`, or `articles:<action>:own` on one's own article.
pub struct ArticleOwnershipSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    article: &'a Article,
    user_id: UserId,
    action: &'static str,
}

impl<'a> ArticleOwnershipSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        article: &'a Article,
        user_id: UserId,
        action: &'static str,
    ) -> Self {
        Self {
            capabilities,
            article,
            user_id,
            action,
        }
    }

    pub fn update(capabilities: &'a HashSet<Capability>, article: &'a Article, user_id: UserId) -> Self {
        Self::new(capabilities, article, user_id, "update")
    }

    pub fn delete(capabilities: &'a HashSet<Capability>, article: &'a Article, user_id: UserId) -> Self {
        Self::new(capabilities, article, user_id, "delete")
    }

    pub fn restore(capabilities: &'a HashSet<Capability>, article: &'a Article, user_id: UserId) -> Self {
        Self::new(capabilities, article, user_id, "restore")
    }

    pub fn is_satisfied(&self) -> bool {
        self.has_capability(&format!("{}:any", self.action))
            || (self.has_capability(&format!("{}:own", self.action))
                && self.article.author_id == self.user_id)
    }

    fn has_capability(&self, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches("articles", action))
    }
}
