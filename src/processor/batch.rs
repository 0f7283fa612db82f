//! Batch processing and per-record fault policy.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, instrument, warn};

use super::record::process_record;
use super::sanitize::SanitizeMode;
use super::types::{BatchRequest, BatchResponse, BatchStatus, InputRecord, OutputRecord};
use crate::error::{RecordError, RequestError};

/// What to do when a single record cannot be processed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// First faulty record aborts the whole batch.
    #[default]
    #[strum(serialize = "fail_fast")]
    FailFast,
    /// Faulty records are counted and skipped.
    #[strum(serialize = "isolate")]
    Isolate,
}

/// Per-request processing options, resolved from configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorOptions {
    /// Fault policy.
    pub policy: BatchPolicy,
    /// How `processed_data` is built.
    pub sanitize_mode: SanitizeMode,
    /// Echo processed records in the response.
    pub include_results: bool,
}

/// Outcome of one record.
pub type RecordOutcome = Result<OutputRecord, RecordError>;

/// Per-record outcomes of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Policy the batch ran under.
    pub policy: BatchPolicy,
    /// One outcome per submitted record.
    pub outcomes: Vec<RecordOutcome>,
}

impl BatchReport {
    /// Number of records processed successfully.
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Number of records that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    /// Successfully processed records, in input order.
    pub fn records(&self) -> impl Iterator<Item = &OutputRecord> {
        self.outcomes.iter().filter_map(|o| o.as_ref().ok())
    }

    /// Build the response body.
    pub fn to_response(&self, include_results: bool) -> BatchResponse {
        let failed = self.failed();

        BatchResponse {
            status: if failed == 0 {
                BatchStatus::Success
            } else {
                BatchStatus::Partial
            },
            processed: self.processed(),
            failed: match self.policy {
                BatchPolicy::Isolate => Some(failed),
                BatchPolicy::FailFast => None,
            },
            results: include_results.then(|| self.records().cloned().collect()),
        }
    }
}

/// Process every record of a batch sequentially, in order.
#[instrument(skip(batch), fields(records = batch.len()))]
pub fn process_batch(
    batch: &BatchRequest,
    options: &ProcessorOptions,
) -> Result<BatchReport, RequestError> {
    let mut outcomes = Vec::with_capacity(batch.len());

    for (index, value) in batch.records.iter().enumerate() {
        let outcome = InputRecord::from_value(index, value)
            .map(|record| process_record(&record, options.sanitize_mode));

        if let Err(e) = &outcome {
            match options.policy {
                BatchPolicy::FailFast => {
                    warn!(index, error = %e, "Record failed, aborting batch");
                    return Err(RequestError::Record(e.clone()));
                }
                BatchPolicy::Isolate => {
                    warn!(index, error = %e, "Record failed, continuing");
                }
            }
        }

        outcomes.push(outcome);
    }

    let report = BatchReport {
        policy: options.policy,
        outcomes,
    };

    debug!(
        processed = report.processed(),
        failed = report.failed(),
        "Batch processed"
    );

    Ok(report)
}
