//! End-to-end tests for the JSON processing service.
//!
//! Each test binds the real router to an ephemeral port and talks to it over
//! HTTP. Run with: cargo test --test integration

use std::net::SocketAddr;

use json_processor::api::{create_router, AppState};
use json_processor::config::Config;
use json_processor::metrics::detached_handle;
use json_processor::processor::{BatchPolicy, SanitizeMode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start the service with the given configuration and return its base URL.
async fn spawn_service(config: Config) -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let router = create_router(AppState::new(&config, detached_handle()));

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn post_batch(base: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/process", base))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn single_record_batch_succeeds() {
    let base = spawn_service(Config::default()).await;

    let response = post_batch(
        &base,
        json!({"records": [{"id": "1", "data": "ab!c", "email": "x@y.com"}]}),
    )
    .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "success", "processed": 1}));
}

#[tokio::test]
async fn processed_equals_number_of_records() {
    let base = spawn_service(Config::default()).await;

    let records: Vec<Value> = (0..250)
        .map(|i| json!({"id": i.to_string(), "data": "x".repeat(i), "metadata": {"n": i}}))
        .collect();

    let response = post_batch(&base, json!({ "records": records })).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["processed"], 250);
}

#[tokio::test]
async fn empty_batch_processes_zero() {
    let base = spawn_service(Config::default()).await;

    let body: Value = post_batch(&base, json!({"records": []}))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "success", "processed": 0}));
}

#[tokio::test]
async fn get_on_process_endpoint_is_405() {
    let base = spawn_service(Config::default()).await;

    let response = reqwest::get(format!("{}/api/process", base)).await.unwrap();

    assert_eq!(response.status(), 405);
    assert_eq!(response.text().await.unwrap(), "Method not allowed");
}

#[tokio::test]
async fn non_list_records_is_500_with_message() {
    let base = spawn_service(Config::default()).await;

    let response = post_batch(&base, json!({"records": "not-a-list"})).await;

    assert_eq!(response.status(), 500);
    let text = response.text().await.unwrap();
    assert!(text.starts_with("Processing error: "), "got: {text}");
    assert!(text.contains("records"));
}

#[tokio::test]
async fn invalid_json_is_500() {
    let base = spawn_service(Config::default()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/process", base))
        .body("{\"records\": [")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("Processing error: "));
}

#[tokio::test]
async fn fail_fast_rejects_batch_with_bad_record() {
    let base = spawn_service(Config::default()).await;

    let response = post_batch(&base, json!({"records": [{"id": "1"}, 7]})).await;

    assert_eq!(response.status(), 500);
    assert!(response.text().await.unwrap().contains("records[1]"));
}

#[tokio::test]
async fn isolate_policy_reports_partial_success() {
    let base = spawn_service(Config {
        batch_policy: BatchPolicy::Isolate,
        ..Config::default()
    })
    .await;

    let response = post_batch(&base, json!({"records": [{"id": "1"}, 7]})).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"status": "partial", "processed": 1, "failed": 1})
    );
}

#[tokio::test]
async fn include_results_echoes_processed_records() {
    let base = spawn_service(Config {
        include_results: true,
        ..Config::default()
    })
    .await;

    let response = post_batch(
        &base,
        json!({"records": [
            {"id": "a", "data": "Hello, World!", "email": "a.b+c@sub.domain.co", "metadata": {"a": 1, "b": 2}},
            {"id": "b", "email": "a@b.c"}
        ]}),
    )
    .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let results = body["results"].as_array().unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["id"], "a");
    assert_eq!(results[0]["processed_data"], "Hello World");
    assert_eq!(results[0]["email_valid"], true);
    assert_eq!(results[0]["metadata_keys"], 2);
    assert!(results[0]["timestamp"].as_i64().unwrap() > 0);
    assert_eq!(results[1]["id"], "b");
    assert_eq!(results[1]["email_valid"], false);
    assert_eq!(results[1]["metadata_keys"], 0);
}

#[tokio::test]
async fn legacy_repeat_mode_matches_old_output() {
    let base = spawn_service(Config {
        include_results: true,
        sanitize_mode: SanitizeMode::LegacyRepeat,
        ..Config::default()
    })
    .await;

    let body: Value = post_batch(&base, json!({"records": [{"data": "ab"}]}))
        .await
        .json()
        .await
        .unwrap();

    let processed = body["results"][0]["processed_data"].as_str().unwrap();
    assert_eq!(processed.len(), 50);
    assert!(processed.starts_with("ab|ab|ab|"));
}

#[tokio::test]
async fn health_reports_process_metrics() {
    let base = spawn_service(Config::default()).await;

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    for key in [
        "java_version",
        "architecture",
        "available_processors",
        "free_memory_mb",
        "total_memory_mb",
    ] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
}
