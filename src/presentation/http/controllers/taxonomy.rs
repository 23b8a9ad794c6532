// src/presentation/http/controllers/taxonomy.rs
//! Categories and tags share one set of handlers; the router nests them under
//! `/api/v1/categories` and `/api/v1/tags` with the [`TermKind`] as an extension.
use crate::application::{
    commands::taxonomy::{CreateTermCommand, RenameTermCommand},
    dto::{PageDto, TermDto},
    queries::taxonomy::ListTermsQuery,
};
use crate::domain::taxonomy::TermKind;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::openapi::TermListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TermListParams {
    pub search: Option<String>,
    /// `name` (default) or `created_at`.
    pub order_by: Option<String>,
    pub sort_direction: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TermRequest {
    pub name: String,
    /// Derived from the name when omitted.
    #[serde(default)]
    pub slug: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/{kind}",
    params(
        ("kind" = String, Path, description = "`categories` or `tags`"),
        TermListParams
    ),
    responses(
        (status = 200, description = "Page of terms.", body = TermListResponse),
        (status = 400, description = "Unknown sort field.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Taxonomy"
)]
pub async fn list_terms(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<TermKind>,
    Query(params): Query<TermListParams>,
) -> HttpResult<Json<PageDto<TermDto>>> {
    let query = ListTermsQuery {
        search: params.search,
        order_by: params.order_by,
        sort_direction: params.sort_direction,
        page: params.page,
        per_page: params.per_page,
        ..ListTermsQuery::new(kind)
    };

    state
        .services
        .taxonomy_queries
        .list_terms(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`categories` or `tags`"),
        ("id" = i64, Path, description = "Term id")
    ),
    responses(
        (status = 200, description = "Term by id.", body = TermDto),
        (status = 404, description = "Term not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Taxonomy"
)]
pub async fn get_term(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<TermKind>,
    Path(id): Path<i64>,
) -> HttpResult<Json<TermDto>> {
    state
        .services
        .taxonomy_queries
        .get_term(kind, id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/{kind}",
    params(("kind" = String, Path, description = "`categories` or `tags`")),
    request_body = TermRequest,
    responses(
        (status = 201, description = "Term created.", body = TermDto),
        (status = 403, description = "Missing <kind>:manage.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug already used.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Taxonomy"
)]
pub async fn create_term(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<TermKind>,
    user: Authenticated,
    Json(payload): Json<TermRequest>,
) -> HttpResult<(StatusCode, Json<TermDto>)> {
    let command = CreateTermCommand {
        kind,
        name: payload.name,
        slug: payload.slug,
    };

    let term = state
        .services
        .taxonomy_commands
        .create_term(&user.actor(), command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(term)))
}

#[utoipa::path(
    put,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`categories` or `tags`"),
        ("id" = i64, Path, description = "Term id")
    ),
    request_body = TermRequest,
    responses(
        (status = 200, description = "Term renamed.", body = TermDto),
        (status = 404, description = "Term not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Taxonomy"
)]
pub async fn rename_term(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<TermKind>,
    user: Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<TermRequest>,
) -> HttpResult<Json<TermDto>> {
    let command = RenameTermCommand {
        kind,
        id,
        name: payload.name,
        slug: payload.slug,
    };

    state
        .services
        .taxonomy_commands
        .rename_term(&user.actor(), command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/{kind}/{id}",
    params(
        ("kind" = String, Path, description = "`categories` or `tags`"),
        ("id" = i64, Path, description = "Term id")
    ),
    responses(
        (status = 204, description = "Term deleted; articles lose the reference."),
        (status = 404, description = "Term not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Taxonomy"
)]
pub async fn delete_term(
    Extension(state): Extension<HttpState>,
    Extension(kind): Extension<TermKind>,
    user: Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .taxonomy_commands
        .delete_term(&user.actor(), kind, id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
