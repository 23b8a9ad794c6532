// src/presentation/http/routes.rs
use crate::domain::taxonomy::TermKind;
use crate::presentation::http::middleware::rate_limit::rate_limit_layer;
use crate::presentation::http::state::{HttpSettings, HttpState};
use crate::presentation::http::{
    controllers::{articles, auth, taxonomy, uploads},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

fn cors_layer(settings: &HttpSettings) -> CorsLayer {
    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

fn credential_routes(settings: &HttpSettings) -> Router {
    let router = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login));

    if !settings.rate_limit_auth {
        return router;
    }
    match rate_limit_layer() {
        Some(limiter) => router.layer(limiter),
        None => {
            tracing::warn!("rate limiter unavailable; credential endpoints are unthrottled");
            router
        }
    }
}

fn taxonomy_routes(kind: TermKind) -> Router {
    Router::new()
        .route("/", get(taxonomy::list_terms).post(taxonomy::create_term))
        .route(
            "/{id}",
            get(taxonomy::get_term)
                .put(taxonomy::rename_term)
                .delete(taxonomy::delete_term),
        )
        .layer(Extension(kind))
}

fn upload_routes(settings: &HttpSettings) -> Router {
    Router::new()
        .route(
            "/api/v1/articles/{id}/cover",
            put(articles::attach_cover_image),
        )
        .route("/api/v1/uploads/images", post(uploads::upload_image))
        .layer(DefaultBodyLimit::max(settings.max_upload_bytes))
}

pub fn build_router(state: HttpState) -> Router {
    let settings = state.settings.as_ref();

    let mut router = Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(credential_routes(settings))
        .route("/api/v1/auth/me", get(auth::profile))
        .route(
            "/api/v1/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/v1/articles/by-slug/{slug}",
            get(articles::get_article_by_slug),
        )
        .route(
            "/api/v1/articles/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/api/v1/articles/{id}/restore",
            post(articles::restore_article),
        )
        .route(
            "/api/v1/articles/{id}/publish",
            put(articles::set_publish_state),
        )
        .merge(upload_routes(settings))
        .nest("/api/v1/categories", taxonomy_routes(TermKind::Category))
        .nest("/api/v1/tags", taxonomy_routes(TermKind::Tag));

    if let Some(uploads) = &settings.uploads {
        router = router.nest_service(&uploads.route, ServeDir::new(&uploads.dir));
    }

    let cors = cors_layer(settings);
    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
