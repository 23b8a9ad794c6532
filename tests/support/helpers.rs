// tests/support/helpers.rs
use super::mocks::{DummyTokenManager, ManualClock, MemoryStorage, MemoryStore, StrictPasswordHasher};
use axum::body::{self, Body};
use axum::http::{HeaderMap, Request, StatusCode, header};
use robotika_cms::application::services::{ApplicationServices, ServiceSettings};
use robotika_cms::domain::user::{Role, UserId};
use robotika_cms::infrastructure::{
    security::view_marker::HmacViewMarkerCodec, util::DefaultSlugGenerator,
};
use robotika_cms::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

/// Services wired to in-memory adapters, with handles kept for assertions.
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryStorage>,
    pub clock: Arc<ManualClock>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(ServiceSettings {
            max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
            ..ServiceSettings::default()
        })
    }

    /// Seeds the three users the test tokens resolve to.
    pub fn with_settings(settings: ServiceSettings) -> Self {
        let store = Arc::new(MemoryStore::new());
        store.seed_user("admin", "Secret123", Role::Admin);
        store.seed_user("ada", "Secret123", Role::Author);
        store.seed_user("linus", "Secret123", Role::Author);

        let storage = Arc::new(MemoryStorage::default());
        let clock = Arc::new(ManualClock::default());
        let services = Arc::new(ApplicationServices::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(StrictPasswordHasher),
            Arc::new(DummyTokenManager),
            storage.clone(),
            Arc::new(HmacViewMarkerCodec::new(b"test-view-secret").unwrap()),
            clock.clone(),
            Arc::new(DefaultSlugGenerator),
            ServiceSettings {
                system_user: UserId(1),
                ..settings
            },
        ));

        Self {
            services,
            store,
            storage,
            clock,
        }
    }

    pub fn router(&self) -> axum::Router {
        build_router(HttpState {
            services: Arc::clone(&self.services),
            settings: Arc::new(HttpSettings {
                allowed_origins: vec!["http://localhost:3000".into()],
                uploads: None,
                max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
                secure_cookies: false,
                rate_limit_auth: false,
            }),
        })
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends one request; an empty body reads as `Value::Null`.
pub async fn send(app: &axum::Router, request: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(request).await.unwrap();
    let (parts, body_stream) = resp.into_parts();
    let bytes = body::to_bytes(body_stream, 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("expected JSON body, got {}", String::from_utf8_lossy(&bytes))
        })
    };
    TestResponse {
        status: parts.status,
        headers: parts.headers,
        json,
    }
}

/// Asserts an `ErrorResponse` body with the expected status and reason.
pub fn assert_error_response(resp: &TestResponse, expected_status: StatusCode, expected_error: &str) {
    assert_eq!(resp.status, expected_status, "body: {}", resp.json);
    let ct = resp
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    assert_eq!(resp.json["error"], expected_error, "body: {}", resp.json);
    let message = resp.json["message"].as_str().unwrap_or("");
    assert!(!message.is_empty(), "expected non-empty message field in ErrorResponse");
}
