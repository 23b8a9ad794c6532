use super::ArticleQueryService;
use crate::{
    application::{
        dto::{Actor, ArticleDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Trashed articles are only returned to actors allowed to restore them.
    pub async fn get_article_by_id(
        &self,
        actor: Option<&Actor>,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|article| Self::can_view(actor, article))
            .filter(|article| !article.is_deleted() || can_see_trash(actor, article))
            .ok_or_else(|| ApplicationError::not_found("article not found"))?;
        Ok(article.into())
    }
}

fn can_see_trash(actor: Option<&Actor>, article: &crate::domain::article::Article) -> bool {
    match actor {
        Some(Actor::System) => true,
        Some(Actor::User(user)) => {
            user.has_capability("articles", "restore:any")
                || (user.has_capability("articles", "restore:own")
                    && user.id == article.author_id)
        }
        None => false,
    }
}
