//! Router-level tests for the HTTP surface.
//!
//! Most tests drive the router directly with `tower::ServiceExt::oneshot`.
//! HEAD semantics are wire-level (the body is stripped when the response is
//! written), so those run against a real listener instead.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use http::{Request, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

use beacon::config::AppConfig;
use beacon::routes::create_router;
use beacon::state::AppState;

fn test_state(version_file: PathBuf) -> AppState {
    AppState::new(AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        version_file,
        ..AppConfig::default()
    })
}

fn test_app() -> axum::Router {
    create_router(test_state(PathBuf::from("does-not-exist.json")))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn info_endpoint_describes_instance() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        content_type.contains("application/json"),
        "expected application/json, got {content_type}"
    );

    let body = body_json(response).await;
    assert_eq!(body["message"], "Hello World from CodePipeline!");
    assert_eq!(body["status"], "success");
    assert_eq!(body["environment"], "test");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
    assert!(!body["hostname"].as_str().unwrap().is_empty());

    let deployment_info = body["deployment_info"].as_object().unwrap();
    assert!(deployment_info.contains_key("deployed_at"));
    assert!(deployment_info.contains_key("runtime_version"));
    assert!(deployment_info.contains_key("platform"));
}

#[tokio::test]
async fn info_endpoint_allows_cross_origin_reads() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn health_endpoint_reports_liveness() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("cache-control").unwrap(), "no-cache");

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn health_uptime_is_monotonic() {
    let app = test_app();

    let mut previous = -1.0_f64;
    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let uptime = body_json(response).await["uptime"].as_f64().unwrap();
        assert!(uptime >= previous, "uptime went backwards: {uptime} < {previous}");
        previous = uptime;
    }
}

#[tokio::test]
async fn undefined_path_returns_json_not_found() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Path /nope not found");
    assert_eq!(
        body["available_endpoints"],
        serde_json::json!(["/", "/health"])
    );
}

#[tokio::test]
async fn version_descriptor_merges_into_deployment_info() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("version.json");
    std::fs::write(&descriptor, r#"{"build": "42", "platform": "ec2"}"#).unwrap();

    let app = create_router(test_state(descriptor));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let deployment_info = body["deployment_info"].as_object().unwrap();
    assert_eq!(deployment_info["build"], "42");
    // Descriptor keys override computed defaults
    assert_eq!(deployment_info["platform"], "ec2");
    assert!(deployment_info.contains_key("deployed_at"));
}

#[tokio::test]
async fn broken_version_descriptor_does_not_fail_requests() {
    let dir = tempfile::tempdir().unwrap();
    let descriptor = dir.path().join("version.json");
    std::fs::write(&descriptor, "{ this is not json").unwrap();

    let app = create_router(test_state(descriptor));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let deployment_info = body["deployment_info"].as_object().unwrap();
    assert_eq!(deployment_info["platform"], std::env::consts::OS);
}

/// Spawn the router on an ephemeral port for wire-level assertions.
async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = test_app();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

#[tokio::test]
async fn head_requests_return_empty_bodies() {
    let addr = spawn_server().await;

    for path in ["/", "/health"] {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(
                format!("HEAD {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                    .as_bytes(),
            )
            .await
            .unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        let text = String::from_utf8_lossy(&response);

        assert!(
            text.starts_with("HTTP/1.1 200"),
            "HEAD {path} did not return 200: {text}"
        );
        assert!(text.to_lowercase().contains("content-type: application/json"));

        let header_end = text.find("\r\n\r\n").unwrap() + 4;
        assert_eq!(&text[header_end..], "", "HEAD {path} body must be empty");
    }
}
