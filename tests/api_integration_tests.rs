//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles against the inspection router.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use keepalive::{api::create_router, AppState, BrowserSession, KeepAliveConfig};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

const FRAME: Duration = Duration::from_millis(20);

fn create_test_app(max_cache: usize) -> Router {
    let config = KeepAliveConfig {
        max_cache,
        exclude: vec!["/login".to_string()],
        ..Default::default()
    };
    let session = BrowserSession::from_config(&config).unwrap();
    create_router(AppState::new(session, FRAME))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn navigate(app: &Router, path: &str) -> Value {
    let body = format!(r#"{{"path":"{}"}}"#, path);
    let (status, json) = send(app, "POST", "/navigate", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    json
}

async fn next_frame() {
    tokio::time::sleep(FRAME * 6).await;
}

// == Navigate Endpoint Tests ==

#[tokio::test]
async fn test_navigate_miss_then_hit() {
    let app = create_test_app(5);

    let first = navigate(&app, "/orders").await;
    assert_eq!(first["key"], "/orders");
    assert_eq!(first["kind"], "miss");
    assert_eq!(first["restore_scheduled"], true);

    navigate(&app, "/users").await;
    let back = navigate(&app, "/orders").await;
    assert_eq!(back["kind"], "hit");
}

#[tokio::test]
async fn test_navigate_excluded_path_renders_fresh() {
    let app = create_test_app(5);

    for _ in 0..2 {
        let json = navigate(&app, "/login").await;
        assert_eq!(json["kind"], "fresh");
        assert!(json["key"].is_null());
    }

    let (status, _) = send(&app, "GET", "/entries/%2Flogin", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["count"], 0);
    assert_eq!(stats["bypasses"], 2);
}

#[tokio::test]
async fn test_navigate_invalid_path() {
    let app = create_test_app(5);

    let (status, json) = send(&app, "POST", "/navigate", Some(r#"{"path":"orders"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("must start with"));
}

#[tokio::test]
async fn test_navigate_with_cache_key_and_title() {
    let app = create_test_app(5);

    let body = r#"{"path":"/orders/7","cache_key":"order-detail","title":"Order 7"}"#;
    let (status, json) = send(&app, "POST", "/navigate", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "order-detail");

    let (status, entry) = send(&app, "GET", "/entries/order-detail", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["path"], "/orders/7");
    assert_eq!(entry["state"], "cached_active");
    assert_eq!(entry["metadata"]["title"], "Order 7");
}

// == Eviction Tests ==

#[tokio::test]
async fn test_single_slot_cache_scenario() {
    let app = create_test_app(1);

    assert_eq!(navigate(&app, "/a").await["kind"], "miss");
    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["count"], 1);

    let second = navigate(&app, "/b").await;
    assert_eq!(second["kind"], "miss");
    assert_eq!(second["evicted"], serde_json::json!(["/a"]));
    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["count"], 1);

    assert_eq!(navigate(&app, "/a").await["kind"], "miss");
    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["count"], 1);
    assert_eq!(stats["evictions"], 2);
}

#[tokio::test]
async fn test_lowering_max_cache_evicts_immediately() {
    let app = create_test_app(5);
    navigate(&app, "/a").await;
    navigate(&app, "/b").await;
    navigate(&app, "/c").await;

    let (status, json) = send(&app, "PUT", "/max-cache", Some(r#"{"max_cache":1}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["evicted"], serde_json::json!(["/a", "/b"]));
    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["keys"], serde_json::json!(["/c"]));
    assert_eq!(stats["active_key"], "/c");
}

#[tokio::test]
async fn test_invalid_max_cache_leaves_cache_unchanged() {
    let app = create_test_app(3);
    navigate(&app, "/a").await;

    let (status, json) = send(&app, "PUT", "/max-cache", Some(r#"{"max_cache":0}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("at least 1"));
    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["max_cache"], 3);
    assert_eq!(stats["count"], 1);
}

// == Entry Management Tests ==

#[tokio::test]
async fn test_remove_and_clear_entries() {
    let app = create_test_app(5);
    navigate(&app, "/a").await;
    navigate(&app, "/b").await;

    let (status, _) = send(&app, "DELETE", "/entries/%2Fa", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", "/entries/%2Fa", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app, "DELETE", "/entries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 1);

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert_eq!(stats["count"], 0);
    assert!(stats["active_key"].is_null());
}

#[tokio::test]
async fn test_policy_update_prunes_hidden_entries() {
    let app = create_test_app(5);
    navigate(&app, "/a").await;
    navigate(&app, "/b").await;

    let (status, json) = send(
        &app,
        "PUT",
        "/policy",
        Some(r#"{"include":[],"exclude":["/a","/login"]}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pruned"], serde_json::json!(["/a"]));
    assert_eq!(navigate(&app, "/a").await["kind"], "fresh");
}

// == Scroll Restoration Tests ==

#[tokio::test]
async fn test_scroll_offset_restored_on_return() {
    let app = create_test_app(5);

    navigate(&app, "/feed").await;
    next_frame().await;
    let (status, _) = send(&app, "PUT", "/viewport", Some(r#"{"offset":900}"#)).await;
    assert_eq!(status, StatusCode::OK);

    navigate(&app, "/profile").await;
    next_frame().await;
    let (_, viewport) = send(&app, "GET", "/viewport", None).await;
    assert_eq!(viewport["offset"], 0.0);
    assert_eq!(viewport["current_path"], "/profile");

    let (_, entry) = send(&app, "GET", "/entries/%2Ffeed", None).await;
    assert_eq!(entry["scroll_offset"], 900.0);
    assert_eq!(entry["state"], "cached_inactive");

    navigate(&app, "/feed").await;
    next_frame().await;
    let (_, viewport) = send(&app, "GET", "/viewport", None).await;
    assert_eq!(viewport["offset"], 900.0);
    assert_eq!(viewport["laid_out"], true);
}

#[tokio::test]
async fn test_stale_restore_not_applied() {
    let app = create_test_app(5);

    navigate(&app, "/feed").await;
    next_frame().await;
    send(&app, "PUT", "/viewport", Some(r#"{"offset":400}"#)).await;
    navigate(&app, "/profile").await;

    // Back and away again inside one frame.
    navigate(&app, "/feed").await;
    navigate(&app, "/profile").await;
    next_frame().await;

    let (_, viewport) = send(&app, "GET", "/viewport", None).await;
    assert_eq!(viewport["offset"], 0.0);
    assert_eq!(viewport["current_path"], "/profile");

    let (_, stats) = send(&app, "GET", "/stats", None).await;
    assert!(stats["dropped_restores"].as_u64().unwrap() >= 1);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(5);

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
