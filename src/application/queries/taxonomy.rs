// src/application/queries/taxonomy.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{ListFilters, PageDto, TermDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        listing::{PageRequest, SortDirection},
        taxonomy::{TaxonomyRepository, TermId, TermKind, TermListQuery, TermSortField},
    },
};

#[derive(Debug, Clone)]
pub struct ListTermsQuery {
    pub kind: TermKind,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListTermsQuery {
    pub fn new(kind: TermKind) -> Self {
        Self {
            kind,
            search: None,
            order_by: None,
            sort_direction: None,
            page: None,
            per_page: None,
        }
    }
}

/// Taxonomies are public; reads need no capability.
pub struct TaxonomyQueryService {
    repo: Arc<dyn TaxonomyRepository>,
}

impl TaxonomyQueryService {
    pub fn new(repo: Arc<dyn TaxonomyRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_term(&self, kind: TermKind, id: i64) -> ApplicationResult<TermDto> {
        let id = TermId::new(id)?;
        self.repo
            .find_by_id(kind, id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("{kind} not found")))
    }

    pub async fn list_terms(&self, query: ListTermsQuery) -> ApplicationResult<PageDto<TermDto>> {
        let order_by = match query.order_by.as_deref() {
            None | Some("") => TermSortField::default(),
            Some(raw) => TermSortField::parse(raw).ok_or_else(|| {
                ApplicationError::validation(format!("cannot sort {} by '{raw}'", query.kind.plural()))
            })?,
        };
        // Names read naturally A to Z; other fields default to newest first.
        let direction = match query.sort_direction.as_deref() {
            None | Some("") if order_by == TermSortField::Name => SortDirection::Asc,
            None | Some("") => SortDirection::Desc,
            Some(raw) => raw.parse::<SortDirection>()?,
        };
        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let page = self
            .repo
            .list(TermListQuery {
                kind: query.kind,
                search: search.clone(),
                order_by,
                direction,
                page: PageRequest::new(query.page, query.per_page),
            })
            .await?;

        let filters = ListFilters {
            search,
            order_by: order_by.as_str().to_string(),
            sort_direction: direction.as_str().to_string(),
            ..ListFilters::default()
        };
        Ok(PageDto::from_page(page, filters))
    }
}
