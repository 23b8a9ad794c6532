use crate::domain::listing::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

/// Echo of the filters that produced a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ListFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub order_by: String,
    pub sort_direction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
    pub filters: ListFilters,
}

impl<T> PageDto<T> {
    pub fn from_page<U>(page: Page<U>, filters: ListFilters) -> Self
    where
        U: Into<T>,
    {
        let meta = PageMeta {
            current_page: page.request.page(),
            last_page: page.last_page(),
            per_page: page.request.per_page(),
            total: page.total,
        };
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            meta,
            filters,
        }
    }
}
