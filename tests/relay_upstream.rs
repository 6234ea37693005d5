// tests/relay_upstream.rs
//
// Relay behavior against a fake upstream news API: one outbound call per request,
// verbatim article passthrough, and the error mapping for each failure class.

mod common;

use std::time::{Duration, Instant};

use axum::{body::Body, http::Request, http::StatusCode};
use news_fusion::sources::REGISTRY;
use serde_json::json;
use tower::ServiceExt as _;

use common::{
    dead_upstream, read_json, relay_config, relay_router, relay_router_with, spawn_raw_upstream,
    spawn_upstream, TEST_KEY,
};

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("build request")
}

#[tokio::test]
async fn each_registered_source_makes_exactly_one_fixed_upstream_call() {
    let (base, hits) = spawn_upstream(StatusCode::OK, json!({ "articles": [] }), Duration::ZERO).await;
    let app = relay_router(base.clone(), Duration::from_secs(5));

    for spec in REGISTRY {
        hits.clear();
        let resp = app
            .clone()
            .oneshot(get(&format!("/api/{}", spec.key)))
            .await
            .expect("oneshot");
        assert_eq!(resp.status(), StatusCode::OK, "source `{}`", spec.key);

        let expected = spec.query.to_url(&base, TEST_KEY).expect("upstream url");
        let expected = format!("{}?{}", expected.path(), expected.query().unwrap_or_default());
        assert_eq!(hits.all(), vec![expected], "source `{}`", spec.key);
    }
}

#[tokio::test]
async fn articles_are_forwarded_verbatim() {
    let articles = json!([
        {
            "source": { "id": "techcrunch", "name": "TechCrunch" },
            "author": null,
            "title": "A",
            "description": "first",
            "url": "https://x",
            "urlToImage": null,
            "publishedAt": "2025-01-01T00:00:00Z",
            "content": "body text"
        },
        { "title": "B", "custom": { "nested": [1, 2, 3] } }
    ]);
    let upstream_body = json!({ "status": "ok", "totalResults": 2, "articles": articles });
    let (base, hits) = spawn_upstream(StatusCode::OK, upstream_body, Duration::ZERO).await;
    let app = relay_router(base, Duration::from_secs(5));

    let resp = app.oneshot(get("/api/techcrunch")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, articles);
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn missing_articles_field_is_not_found() {
    for body in [
        json!({ "status": "ok", "totalResults": 3 }),
        json!({ "articles": null }),
        json!({ "message": "everything is fine", "results": [] }),
    ] {
        let (base, hits) = spawn_upstream(StatusCode::OK, body.clone(), Duration::ZERO).await;
        let app = relay_router(base, Duration::from_secs(5));

        let resp = app.oneshot(get("/api/wsj")).await.expect("oneshot");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "body {body}");
        assert_eq!(read_json(resp).await, json!({ "error": "No articles found" }));
        assert_eq!(hits.count(), 1);
    }
}

#[tokio::test]
async fn non_json_success_body_is_not_found() {
    for (content_type, body) in [
        ("text/html; charset=utf-8", "<html><body>Service page</body></html>"),
        ("application/json", "{\"articles\": [truncated"),
        ("text/plain", ""),
    ] {
        let (base, hits) = spawn_raw_upstream(StatusCode::OK, content_type, body.to_string()).await;
        let app = relay_router(base, Duration::from_secs(5));

        let resp = app.oneshot(get("/api/techcrunch")).await.expect("oneshot");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "body {body:?}");
        assert_eq!(read_json(resp).await, json!({ "error": "No articles found" }));
        assert_eq!(hits.count(), 1);
    }
}

#[tokio::test]
async fn oversized_upstream_body_is_refused() {
    let filler = "x".repeat(4096);
    let body = json!({ "articles": [{ "title": "big", "content": filler }] }).to_string();
    let (base, hits) = spawn_raw_upstream(StatusCode::OK, "application/json", body).await;
    let cfg = relay_config(base, Duration::from_secs(5)).with_max_body(1024);
    let app = relay_router_with(&cfg);

    let resp = app.oneshot(get("/api/wsj")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(resp).await, json!({ "error": "Failed to fetch news" }));
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn body_within_cap_is_forwarded() {
    let articles = json!([{ "title": "small" }]);
    let body = json!({ "articles": articles }).to_string();
    let (base, _) = spawn_raw_upstream(StatusCode::OK, "application/json", body).await;
    let cfg = relay_config(base, Duration::from_secs(5)).with_max_body(1024);
    let app = relay_router_with(&cfg);

    let resp = app.oneshot(get("/api/wsj")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_json(resp).await, articles);
}

#[tokio::test]
async fn upstream_error_status_and_message_are_propagated() {
    let (base, _) = spawn_upstream(
        StatusCode::UNAUTHORIZED,
        json!({ "status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid." }),
        Duration::ZERO,
    )
    .await;
    let app = relay_router(base, Duration::from_secs(5));

    let resp = app.oneshot(get("/api/business")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(resp).await,
        json!({ "error": "News API error", "details": "Your API key is invalid." })
    );
}

#[tokio::test]
async fn upstream_error_without_message_uses_placeholder() {
    let (base, _) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "status": "error" }),
        Duration::ZERO,
    )
    .await;
    let app = relay_router(base, Duration::from_secs(5));

    let resp = app.oneshot(get("/api/india")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        read_json(resp).await,
        json!({ "error": "News API error", "details": "Unknown API error" })
    );
}

#[tokio::test]
async fn slow_upstream_times_out_with_408() {
    let (base, hits) = spawn_upstream(
        StatusCode::OK,
        json!({ "articles": [] }),
        Duration::from_secs(5),
    )
    .await;
    let app = relay_router(base, Duration::from_millis(300));

    let started = Instant::now();
    let resp = app.oneshot(get("/api/apple")).await.expect("oneshot");
    let elapsed = started.elapsed();

    assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(read_json(resp).await, json!({ "error": "Request timeout" }));
    assert!(
        elapsed < Duration::from_secs(3),
        "relay kept waiting after the timeout: {elapsed:?}"
    );
    assert_eq!(hits.count(), 1, "no retry after timeout");
}

#[tokio::test]
async fn unreachable_upstream_is_generic_server_error() {
    let app = relay_router(dead_upstream().await, Duration::from_secs(5));

    let resp = app.oneshot(get("/api/techcrunch")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(resp).await, json!({ "error": "Failed to fetch news" }));
}
