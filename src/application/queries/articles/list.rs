use super::ArticleQueryService;
use crate::{
    application::{
        dto::{Actor, ArticleDto, ListFilters, PageDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleListQuery, ArticleSortField, StatusFilter},
        listing::{PageRequest, SortDirection},
        taxonomy::TermId,
    },
};

/// Raw listing parameters as received from the caller.
#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub status: Option<String>,
    pub trashed: bool,
    pub order_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ArticleQueryService {
    pub async fn list_articles(
        &self,
        actor: Option<&Actor>,
        query: ListArticlesQuery,
    ) -> ApplicationResult<PageDto<ArticleDto>> {
        let status = match query.status.as_deref() {
            None | Some("") => StatusFilter::default(),
            Some(raw) => StatusFilter::parse(raw)
                .ok_or_else(|| ApplicationError::validation(format!("unknown status '{raw}'")))?,
        };
        let needs_drafts = status != StatusFilter::Published || query.trashed;
        if needs_drafts && !actor.is_some_and(|a| a.has_capability("articles", "view:drafts")) {
            return Err(ApplicationError::forbidden(
                "missing capability articles:view:drafts",
            ));
        }

        let order_by = match query.order_by.as_deref() {
            None | Some("") => ArticleSortField::default(),
            Some(raw) => ArticleSortField::parse(raw).ok_or_else(|| {
                ApplicationError::validation(format!("cannot sort articles by '{raw}'"))
            })?,
        };
        let direction = match query.sort_direction.as_deref() {
            None | Some("") => SortDirection::default(),
            Some(raw) => raw.parse::<SortDirection>()?,
        };
        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let list_query = ArticleListQuery {
            search: search.clone(),
            category_id: query.category_id.map(TermId::new).transpose()?,
            tag_id: query.tag_id.map(TermId::new).transpose()?,
            status,
            trashed: query.trashed,
            order_by,
            direction,
            page: PageRequest::new(query.page, query.per_page),
        };
        let page = self.read_repo.list(list_query).await?;

        let filters = ListFilters {
            search,
            order_by: order_by.as_str().to_string(),
            sort_direction: direction.as_str().to_string(),
            status: Some(status.as_str().to_string()),
            category_id: query.category_id,
            tag_id: query.tag_id,
            trashed: query.trashed.then_some(true),
        };
        Ok(PageDto::from_page(page, filters))
    }
}
