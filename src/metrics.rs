//! Prometheus metrics for request latency and batch throughput.

use std::time::{Duration, Instant};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

/// How often histogram samples are drained into their summaries.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Batch size metric name.
pub const METRIC_BATCH_SIZE: &str = "batch_size_records";
/// Batches processed counter metric name.
pub const METRIC_BATCHES_PROCESSED: &str = "batches_processed_total";
/// Batches rejected counter metric name.
pub const METRIC_BATCHES_FAILED: &str = "batches_failed_total";
/// Records processed counter metric name.
pub const METRIC_RECORDS_PROCESSED: &str = "records_processed_total";
/// Records failed counter metric name.
pub const METRIC_RECORDS_FAILED: &str = "records_failed_total";

/// Initialize all metric descriptions.
/// Call this once at startup, after the recorder is installed.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(METRIC_BATCH_SIZE, "Number of records per submitted batch");

    describe_counter!(
        METRIC_BATCHES_PROCESSED,
        "Total number of batches processed"
    );
    describe_counter!(
        METRIC_BATCHES_FAILED,
        "Total number of batches rejected"
    );
    describe_counter!(
        METRIC_RECORDS_PROCESSED,
        "Total number of records processed"
    );
    describe_counter!(
        METRIC_RECORDS_FAILED,
        "Total number of records that failed"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Periodically run exporter upkeep so unscraped histograms stay bounded.
pub fn spawn_upkeep(handle: PrometheusHandle, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Handle backed by a recorder that is not installed globally.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &'static str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .record(latency_ms);
}

/// Record the size of a submitted batch.
pub fn record_batch_size(records: usize) {
    histogram!(METRIC_BATCH_SIZE).record(records as f64);
}

/// Count a processed batch and its record outcomes.
pub fn inc_batch_processed(processed: usize, failed: usize) {
    counter!(METRIC_BATCHES_PROCESSED).increment(1);
    counter!(METRIC_RECORDS_PROCESSED).increment(processed as u64);
    if failed > 0 {
        counter!(METRIC_RECORDS_FAILED).increment(failed as u64);
    }
}

/// Count a rejected batch.
pub fn inc_batch_failed() {
    counter!(METRIC_BATCHES_FAILED).increment(1);
}
