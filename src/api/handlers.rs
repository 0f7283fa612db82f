//! HTTP API handlers.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::RequestError;
use crate::metrics;
use crate::processor::{process_batch, BatchRequest, BatchResponse, ProcessorOptions};
use crate::system;

/// Path of the batch processing endpoint.
pub const PROCESS_PATH: &str = "/api/process";

const JSON_CONTENT_TYPE: &str = "application/json";
const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Processing options resolved at startup.
    pub options: ProcessorOptions,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
    /// Prometheus render handle.
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Create app state from configuration.
    pub fn new(config: &Config, metrics: PrometheusHandle) -> Self {
        Self {
            options: config.processor_options(),
            max_body_bytes: config.max_body_bytes,
            metrics,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "healthy".
    pub status: &'static str,
    /// Runtime identifier, under the key legacy health checks read.
    #[serde(rename = "java_version")]
    pub runtime_version: String,
    /// CPU architecture.
    pub architecture: &'static str,
    /// Logical processors available.
    pub available_processors: usize,
    /// Free memory in megabytes.
    pub free_memory_mb: u64,
    /// Total memory in megabytes.
    pub total_memory_mb: u64,
}

/// Service description served at the root path.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// CPU architecture.
    pub architecture: &'static str,
    /// Endpoint descriptions keyed by "METHOD /path".
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        // Bare message under a JSON content type.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            format!("Processing error: {}", self),
        )
            .into_response()
    }
}

/// Parse and process one batch.
pub fn handle_batch(
    body: &[u8],
    options: &ProcessorOptions,
) -> Result<BatchResponse, RequestError> {
    let batch = BatchRequest::from_slice(body)?;
    metrics::record_batch_size(batch.len());

    let report = process_batch(&batch, options)?;
    metrics::inc_batch_processed(report.processed(), report.failed());

    Ok(report.to_response(options.include_results))
}

/// Batch processing handler.
pub async fn process(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let start = Instant::now();

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(status = %rejection.status(), error = %rejection, "Request body rejected");
            metrics::inc_batch_failed();
            let response = (
                rejection.status(),
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                rejection.body_text(),
            )
                .into_response();
            metrics::record_http_latency(start, PROCESS_PATH, response.status().as_u16());
            return response;
        }
    };

    let response = match handle_batch(&body, &state.options) {
        Ok(batch) => {
            debug!(processed = batch.processed, "Batch accepted");
            (StatusCode::OK, Json(batch)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Processing error");
            metrics::inc_batch_failed();
            e.into_response()
        }
    };

    metrics::record_http_latency(start, PROCESS_PATH, response.status().as_u16());
    response
}

/// Non-POST requests to the processing endpoint.
pub async fn method_not_allowed() -> Response {
    let start = Instant::now();

    let response = (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
        "Method not allowed",
    )
        .into_response();

    metrics::record_http_latency(start, PROCESS_PATH, response.status().as_u16());
    response
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    let memory = system::memory_snapshot();

    Json(HealthResponse {
        status: "healthy",
        runtime_version: system::runtime_version(),
        architecture: system::architecture(),
        available_processors: system::available_processors(),
        free_memory_mb: memory.free_mb,
        total_memory_mb: memory.total_mb,
    })
}

/// Service description handler.
pub async fn info() -> impl IntoResponse {
    let endpoints = BTreeMap::from([
        ("POST /api/process", "Process a batch of records"),
        ("GET /health", "Health check"),
        ("GET /metrics", "Prometheus metrics"),
    ]);

    Json(ServiceInfo {
        service: "JSON Processing Service",
        version: system::SERVICE_VERSION,
        architecture: system::architecture(),
        endpoints,
    })
}

/// Prometheus exposition handler.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    )
}
