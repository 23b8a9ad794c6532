// tests/e2e_articles.rs
use axum::http::{StatusCode, header};
use serde_json::json;

mod support;

use support::{ADMIN_TOKEN, AUTHOR_TOKEN, OTHER_AUTHOR_TOKEN, TestApp, json_request, send};

async fn create(app: &axum::Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let resp = send(app, json_request("POST", "/api/v1/articles", Some(token), Some(body))).await;
    assert_eq!(resp.status, StatusCode::CREATED, "body: {}", resp.json);
    resp.json
}

#[tokio::test]
async fn created_articles_get_unique_slugs() {
    let app = TestApp::new().router();
    let body = json!({ "title": "Robot Line Follower!!", "body": "PID all the way." });

    let first = create(&app, AUTHOR_TOKEN, body.clone()).await;
    let second = create(&app, AUTHOR_TOKEN, body).await;

    assert_eq!(first["slug"], "robot-line-follower");
    assert_eq!(second["slug"], "robot-line-follower-1");
    assert_eq!(second["published"], false);
    assert_eq!(second["author_id"], support::AUTHOR_ID);
}

#[tokio::test]
async fn published_article_views_are_counted_once_per_viewer() {
    let app = TestApp::new().router();
    let created = create(
        &app,
        AUTHOR_TOKEN,
        json!({ "title": "Sumo Bot", "body": "Push.", "publish": true }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let first = send(&app, json_request("GET", "/api/v1/articles/by-slug/sumo-bot", None, None)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json["view_count"], 1);
    let set_cookie = first
        .headers
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("first view sets a marker cookie")
        .to_string();
    let name = format!("article_viewed_{id}=");
    assert!(set_cookie.starts_with(&name), "cookie: {set_cookie}");
    assert!(set_cookie.contains("Max-Age=31536000"));
    assert!(set_cookie.contains("HttpOnly"));
    let pair = set_cookie.split(';').next().unwrap().to_string();

    let mut repeat = json_request("GET", "/api/v1/articles/by-slug/sumo-bot", None, None);
    repeat
        .headers_mut()
        .insert(header::COOKIE, pair.parse().unwrap());
    let repeat = send(&app, repeat).await;
    assert_eq!(repeat.status, StatusCode::OK);
    assert_eq!(repeat.json["view_count"], 1);
    assert!(repeat.headers.get(header::SET_COOKIE).is_none());

    let stranger = send(&app, json_request("GET", "/api/v1/articles/by-slug/sumo-bot", None, None)).await;
    assert_eq!(stranger.json["view_count"], 2);
}

#[tokio::test]
async fn drafts_are_hidden_from_the_public() {
    let app = TestApp::new().router();
    let created = create(&app, AUTHOR_TOKEN, json!({ "title": "Secret Plans", "body": "..." })).await;
    let id = created["id"].as_i64().unwrap();

    let anonymous = send(&app, json_request("GET", "/api/v1/articles/by-slug/secret-plans", None, None)).await;
    assert_eq!(anonymous.status, StatusCode::NOT_FOUND);

    let owner = send(
        &app,
        json_request("GET", &format!("/api/v1/articles/{id}"), Some(AUTHOR_TOKEN), None),
    )
    .await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(owner.json["view_count"], 0);

    let stranger = send(
        &app,
        json_request("GET", &format!("/api/v1/articles/{id}"), Some(OTHER_AUTHOR_TOKEN), None),
    )
    .await;
    assert_eq!(stranger.status, StatusCode::NOT_FOUND);

    let drafts_for_admin = send(
        &app,
        json_request("GET", "/api/v1/articles?status=draft", Some(ADMIN_TOKEN), None),
    )
    .await;
    assert_eq!(drafts_for_admin.status, StatusCode::OK);
    assert_eq!(drafts_for_admin.json["meta"]["total"], 1);
}

#[tokio::test]
async fn publish_and_unpublish_keep_the_first_timestamp() {
    let app = TestApp::new().router();
    let created = create(&app, AUTHOR_TOKEN, json!({ "title": "Gearbox", "body": "Ratios." })).await;
    let id = created["id"].as_i64().unwrap();
    let uri = format!("/api/v1/articles/{id}/publish");

    let published = send(
        &app,
        json_request("PUT", &uri, Some(AUTHOR_TOKEN), Some(json!({ "publish": true }))),
    )
    .await;
    assert_eq!(published.status, StatusCode::OK);
    assert_eq!(published.json["published"], true);
    let stamp = published.json["published_at"].clone();
    assert!(stamp.is_string());

    let unpublished = send(
        &app,
        json_request("PUT", &uri, Some(AUTHOR_TOKEN), Some(json!({ "publish": false }))),
    )
    .await;
    assert_eq!(unpublished.json["published"], false);
    assert_eq!(unpublished.json["published_at"], stamp);
}

#[tokio::test]
async fn listing_filters_sorts_and_paginates() {
    let test_app = TestApp::new();
    let category = test_app.store.seed_term(
        robotika_cms::domain::taxonomy::TermKind::Category,
        "Competitions",
        "competitions",
    );
    let app = test_app.router();

    for title in ["Alpha Bot", "Beta Bot", "Gamma Bot"] {
        create(
            &app,
            AUTHOR_TOKEN,
            json!({ "title": title, "body": "b", "publish": true, "category_id": category.id.0 }),
        )
        .await;
    }
    create(&app, AUTHOR_TOKEN, json!({ "title": "Uncategorised", "body": "b", "publish": true })).await;
    create(&app, AUTHOR_TOKEN, json!({ "title": "Draft Bot", "body": "b" })).await;

    let resp = send(
        &app,
        json_request(
            "GET",
            &format!(
                "/api/v1/articles?category_id={}&order_by=title&sort_direction=asc&per_page=2&page=2",
                category.id.0
            ),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json["meta"]["total"], 3);
    assert_eq!(resp.json["meta"]["last_page"], 2);
    assert_eq!(resp.json["items"][0]["title"], "Gamma Bot");
    assert_eq!(resp.json["filters"]["order_by"], "title");
    assert_eq!(resp.json["filters"]["sort_direction"], "asc");

    let search = send(&app, json_request("GET", "/api/v1/articles?search=bot", None, None)).await;
    assert_eq!(search.json["meta"]["total"], 3);
    assert_eq!(search.json["filters"]["search"], "bot");
}

#[tokio::test]
async fn trash_can_be_listed_and_restored() {
    let app = TestApp::new().router();
    let created = create(&app, AUTHOR_TOKEN, json!({ "title": "Old Robot", "body": "b" })).await;
    let id = created["id"].as_i64().unwrap();

    let deleted = send(
        &app,
        json_request("DELETE", &format!("/api/v1/articles/{id}"), Some(AUTHOR_TOKEN), None),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let trash = send(
        &app,
        json_request("GET", "/api/v1/articles?trashed=true&status=all", Some(ADMIN_TOKEN), None),
    )
    .await;
    assert_eq!(trash.status, StatusCode::OK);
    assert_eq!(trash.json["meta"]["total"], 1);
    assert_eq!(trash.json["filters"]["trashed"], true);

    let restored = send(
        &app,
        json_request("POST", &format!("/api/v1/articles/{id}/restore"), Some(AUTHOR_TOKEN), None),
    )
    .await;
    assert_eq!(restored.status, StatusCode::OK);
    assert_eq!(restored.json["slug"], "old-robot");
    assert!(restored.json.get("deleted_at").is_none());
}

#[tokio::test]
async fn null_clears_optional_fields_on_update() {
    let app = TestApp::new().router();
    let created = create(
        &app,
        AUTHOR_TOKEN,
        json!({ "title": "Lidar", "body": "b", "excerpt": "Spinning lasers" }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["excerpt"], "Spinning lasers");

    let untouched = send(
        &app,
        json_request("PUT", &format!("/api/v1/articles/{id}"), Some(AUTHOR_TOKEN), Some(json!({ "body": "new" }))),
    )
    .await;
    assert_eq!(untouched.json["excerpt"], "Spinning lasers");

    let cleared = send(
        &app,
        json_request("PUT", &format!("/api/v1/articles/{id}"), Some(AUTHOR_TOKEN), Some(json!({ "excerpt": null }))),
    )
    .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.json["excerpt"].is_null());
}

#[tokio::test]
async fn cover_images_are_stored_and_attached() {
    let test_app = TestApp::new();
    let app = test_app.router();
    let created = create(&app, AUTHOR_TOKEN, json!({ "title": "Hexapod", "body": "b" })).await;
    let id = created["id"].as_i64().unwrap();

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/api/v1/articles/{id}/cover"))
        .header(header::AUTHORIZATION, format!("Bearer {AUTHOR_TOKEN}"))
        .header(header::CONTENT_TYPE, "image/png")
        .body(axum::body::Body::from(vec![0x89, b'P', b'N', b'G']))
        .unwrap();
    let resp = send(&app, request).await;
    assert_eq!(resp.status, StatusCode::OK, "body: {}", resp.json);
    assert_eq!(resp.json["cover_image_path"], "articles/covers/file-1.png");
    assert_eq!(test_app.storage.stored_paths(), vec!["articles/covers/file-1.png"]);
}
