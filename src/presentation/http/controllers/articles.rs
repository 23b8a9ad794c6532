// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        AttachCoverImageCommand, CreateArticleCommand, DeleteArticleCommand, RecordViewCommand,
        RestoreArticleCommand, SetPublishStateCommand, UpdateArticleCommand,
    },
    dto::{ArticleDto, PageDto},
    ports::storage::UploadedFile,
    queries::articles::{GetArticleByIdQuery, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::presentation::http::cookies;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{Authenticated, MaybeAuthenticated};
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use headers::{ContentType, HeaderMapExt};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, ToSchema};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Case-insensitive match on title, excerpt and body.
    pub search: Option<String>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    /// `published` (default), `draft` or `all`.
    pub status: Option<String>,
    /// List trashed articles instead of live ones.
    #[serde(default)]
    pub trashed: bool,
    /// `created_at` (default), `published_at`, `title` or `view_count`.
    pub order_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_direction: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub body: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
    #[serde(default)]
    pub publish: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    /// `null` clears the excerpt.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub excerpt: Option<Option<String>>,
    pub body: Option<String>,
    /// `null` clears the category.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub publish: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PublishRequest {
    pub publish: bool,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "Filtered, sorted page of articles.", body = ArticleListResponse),
        (status = 400, description = "Unknown filter or sort field.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Drafts or trash requested without permission.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<PageDto<ArticleDto>>> {
    let query = ListArticlesQuery {
        search: params.search,
        category_id: params.category_id,
        tag_id: params.tag_id,
        status: params.status,
        trashed: params.trashed,
        order_by: params.order_by,
        sort_direction: params.sort_direction,
        page: params.page,
        per_page: params.per_page,
    };

    state
        .services
        .article_queries
        .list_articles(actor.actor().as_ref(), query)
        .await
        .into_http()
        .map(Json)
}

/// Public article page. A published article counts one view per viewer; the
/// viewer is remembered through a signed `article_viewed_<id>` cookie.
#[utoipa::path(
    get,
    path = "/api/v1/articles/by-slug/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Article; may set a view marker cookie.", body = ArticleDto),
        (status = 404, description = "No visible article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> HttpResult<Response> {
    let mut article = state
        .services
        .article_queries
        .get_article_by_slug(actor.actor().as_ref(), GetArticleBySlugQuery { slug })
        .await
        .into_http()?;

    let mut response_headers = HeaderMap::new();
    if article.published {
        let command = RecordViewCommand {
            article_id: article.id,
            marker: cookies::read_view_marker(&headers, article.id),
        };
        match state.services.article_commands.record_view(command).await {
            Ok(outcome) => {
                if let Some(count) = outcome.view_count {
                    article.view_count = count;
                }
                let now = state.services.clock().now();
                if let Some(cookie) = outcome.marker.as_ref().and_then(|marker| {
                    cookies::view_marker_cookie(
                        article.id,
                        marker,
                        now,
                        state.settings.secure_cookies,
                    )
                }) {
                    response_headers.insert(header::SET_COOKIE, cookie);
                }
            }
            Err(err) => {
                tracing::warn!(article_id = article.id, error = %err, "failed to record view");
            }
        }
    }

    Ok((response_headers, Json(article)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article by id.", body = ArticleDto),
        (status = 404, description = "Article not found or not visible.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    actor: MaybeAuthenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(actor.actor().as_ref(), GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug lost to a concurrent write twice.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "No unique slug could be generated.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        body: payload.body,
        category_id: payload.category_id,
        tag_ids: payload.tag_ids,
        publish: payload.publish,
    };

    let created = state
        .services
        .article_commands
        .create_article(&user.actor(), command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated.", body = ArticleDto),
        (status = 403, description = "Not allowed to edit this article.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Concurrent modification.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        id,
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        body: payload.body,
        category_id: payload.category_id,
        tag_ids: payload.tag_ids,
        publish: payload.publish,
    };

    state
        .services
        .article_commands
        .update_article(&user.actor(), command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article moved to trash."),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(&user.actor(), DeleteArticleCommand { id })
        .await
        .into_http()?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/restore",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 200, description = "Article restored.", body = ArticleDto),
        (status = 409, description = "Not trashed, or its slug is in use again.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn restore_article(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .restore_article(&user.actor(), RestoreArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}/publish",
    params(("id" = i64, Path, description = "Article id")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Publish state applied.", body = ArticleDto)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn set_publish_state(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<PublishRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = SetPublishStateCommand {
        id,
        publish: payload.publish,
    };

    state
        .services
        .article_commands
        .set_publish_state(&user.actor(), command)
        .await
        .into_http()
        .map(Json)
}

pub(crate) fn uploaded_file(headers: &HeaderMap, body: Bytes) -> UploadedFile {
    let content_type = headers
        .typed_get::<ContentType>()
        .map(|ct| ct.to_string())
        .unwrap_or_default();
    UploadedFile::new(body, content_type)
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}/cover",
    params(("id" = i64, Path, description = "Article id")),
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "image/*"),
    responses(
        (status = 200, description = "Cover image stored and attached.", body = ArticleDto),
        (status = 400, description = "Empty or non-image body.", body = crate::presentation::http::error::ErrorResponse),
        (status = 413, description = "Image exceeds the upload limit.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn attach_cover_image(
    Extension(state): Extension<HttpState>,
    user: Authenticated,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> HttpResult<Json<ArticleDto>> {
    let command = AttachCoverImageCommand {
        id,
        file: uploaded_file(&headers, body),
    };

    state
        .services
        .article_commands
        .attach_cover_image(&user.actor(), command)
        .await
        .into_http()
        .map(Json)
}
