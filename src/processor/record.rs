//! Single-record transformation.

use chrono::Utc;

use super::email::is_valid_email;
use super::sanitize::{processed_data, SanitizeMode};
use super::types::{InputRecord, OutputRecord};

/// Transform one record. Pure apart from the embedded timestamp.
pub fn process_record(record: &InputRecord, mode: SanitizeMode) -> OutputRecord {
    OutputRecord {
        id: record.id.clone(),
        processed_data: processed_data(&record.data, mode),
        email_valid: is_valid_email(&record.email),
        metadata_keys: record.metadata.len(),
        timestamp: Utc::now().timestamp_millis(),
    }
}
