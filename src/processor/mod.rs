//! Record processing pipeline: sanitization, email validation, metadata
//! inspection and batch aggregation.

pub mod batch;
pub mod email;
pub mod record;
pub mod sanitize;
pub mod types;

pub use batch::{process_batch, BatchPolicy, BatchReport, ProcessorOptions, RecordOutcome};
pub use email::is_valid_email;
pub use record::process_record;
pub use sanitize::{processed_data, sanitize, SanitizeMode};
pub use types::{BatchRequest, BatchResponse, BatchStatus, InputRecord, OutputRecord};
