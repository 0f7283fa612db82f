//! Prometheus exposition tests.
//!
//! Installs the process-wide recorder, so this suite lives in its own test
//! binary. Run with: cargo test --test metrics

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use json_processor::api::{create_router, AppState};
use json_processor::config::Config;
use json_processor::metrics::install_recorder;
use metrics_exporter_prometheus::PrometheusHandle;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

fn app(config: &Config, handle: &PrometheusHandle) -> Router {
    create_router(AppState::new(config, handle.clone()))
}

async fn send(app: Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn exposition_covers_every_process_outcome() {
    let handle = install_recorder().unwrap();
    let default_config = Config::default();
    let small_body = Config {
        max_body_bytes: 16,
        ..Config::default()
    };

    let (status, _) = send(app(&default_config, &handle), Method::GET, "/api/process", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(
        app(&default_config, &handle),
        Method::POST,
        "/api/process",
        r#"{"records":[{"id":"1"},{"id":"2"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app(&default_config, &handle),
        Method::POST,
        "/api/process",
        r#"{"records":"not-a-list"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(
        app(&small_body, &handle),
        Method::POST,
        "/api/process",
        r#"{"records":[{"id":"1"},{"id":"2"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

    let (status, text) = send(app(&default_config, &handle), Method::GET, "/metrics", "").await;
    assert_eq!(status, StatusCode::OK);

    for code in ["200", "405", "413", "500"] {
        assert!(
            text.contains(&format!(r#"endpoint="/api/process",status="{code}""#)),
            "no latency series for {code}:\n{text}"
        );
    }

    assert!(text.contains("batches_processed_total 1"), "{text}");
    assert!(text.contains("records_processed_total 2"), "{text}");
    assert!(text.contains("batches_failed_total 2"), "{text}");
    assert!(text.contains("batch_size_records_count 1"), "{text}");
}
