//! End-to-End Server Tests
//!
//! Serves the router on an ephemeral port and talks to it over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use keepalive::{api::create_router, AppState, Config, KeepAliveConfig};
use serde_json::{json, Value};

// == Helper Functions ==

async fn spawn_server(config: &Config) -> SocketAddr {
    let state = AppState::from_config(config).unwrap();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn test_config() -> Config {
    Config {
        keepalive: KeepAliveConfig {
            max_cache: 2,
            exclude: vec!["/login".to_string()],
            ..Default::default()
        },
        frame_interval_ms: 10,
        ..Default::default()
    }
}

// == Tests ==

#[tokio::test]
async fn test_browsing_session_over_http() {
    let addr = spawn_server(&test_config()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");

    for path in ["/inbox", "/login", "/settings", "/inbox"] {
        let response = client
            .post(format!("{}/navigate", base))
            .json(&json!({ "path": path }))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }

    let stats: Value = client
        .get(format!("{}/stats", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["count"], 2);
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 2);
    assert_eq!(stats["bypasses"], 1);
    assert_eq!(stats["active_key"], "/inbox");
    assert_eq!(stats["keys"], json!(["/inbox", "/settings"]));
}

#[tokio::test]
async fn test_scroll_position_over_http() {
    let addr = spawn_server(&test_config()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);
    let frame = Duration::from_millis(100);

    let navigate = |path: &'static str| {
        client
            .post(format!("{}/navigate", base))
            .json(&json!({ "path": path }))
            .send()
    };

    navigate("/inbox").await.unwrap();
    tokio::time::sleep(frame).await;
    client
        .put(format!("{}/viewport", base))
        .json(&json!({ "offset": 420.0 }))
        .send()
        .await
        .unwrap();

    navigate("/settings").await.unwrap();
    tokio::time::sleep(frame).await;
    navigate("/inbox").await.unwrap();
    tokio::time::sleep(frame).await;

    let viewport: Value = client
        .get(format!("{}/viewport", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(viewport["offset"], 420.0);
    assert_eq!(viewport["current_path"], "/inbox");
}

#[tokio::test]
async fn test_unknown_entry_returns_json_error() {
    let addr = spawn_server(&test_config()).await;

    let response = reqwest::get(format!("http://{}/entries/nowhere", addr))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nowhere"));
}
