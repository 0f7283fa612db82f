//! Unified error types for the processing service.

use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that reject a whole batch.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Body parsed but is not a JSON object.
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type of the body.
        found: &'static str,
    },

    /// The `records` field is absent.
    #[error("missing field `records`")]
    MissingRecords,

    /// The `records` field is not an array.
    #[error("field `records` must be an array, found {found}")]
    RecordsNotArray {
        /// JSON type of the `records` value.
        found: &'static str,
    },

    /// A record failed under the fail-fast policy.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Errors local to a single record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Element of `records` is not a JSON object.
    #[error("records[{index}] must be an object, found {found}")]
    NotAnObject {
        /// Position in the batch.
        index: usize,
        /// JSON type of the element.
        found: &'static str,
    },
}

impl RecordError {
    /// Position of the faulty record in its batch.
    pub fn index(&self) -> usize {
        match self {
            Self::NotAnObject { index, .. } => *index,
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
