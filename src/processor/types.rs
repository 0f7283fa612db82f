//! Request, record and response types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RecordError, RequestError};

/// Name of the JSON type of a value, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One input record. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    /// Caller-supplied identifier.
    pub id: String,
    /// Free-form text to sanitize.
    pub data: String,
    /// Address to validate.
    pub email: String,
    /// Nested metadata; empty when absent or not an object.
    pub metadata: Map<String, Value>,
}

impl InputRecord {
    /// Extract a record from one element of `records`.
    ///
    /// Only the element itself must be an object; every field is extracted
    /// best-effort and never fails.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, RecordError> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject {
                index,
                found: json_type_name(value),
            });
        };

        Ok(Self {
            id: text_field(fields, "id"),
            data: text_field(fields, "data"),
            email: text_field(fields, "email"),
            metadata: match fields.get("metadata") {
                Some(Value::Object(map)) => map.clone(),
                _ => Map::new(),
            },
        })
    }
}

/// Read a field as text: strings verbatim, null/absent as empty, anything else as JSON.
fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// One processed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Identifier copied from the input.
    pub id: String,
    /// Sanitized data, at most 50 characters.
    pub processed_data: String,
    /// Whether `email` is a well-formed address.
    pub email_valid: bool,
    /// Number of top-level metadata keys.
    pub metadata_keys: usize,
    /// Processing time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// A parsed batch. Elements are kept raw so each record can fail on its own.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    /// Records in submission order.
    pub records: Vec<Value>,
}

impl BatchRequest {
    /// Parse a request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Extract the `records` array from a parsed body.
    pub fn from_value(value: Value) -> Result<Self, RequestError> {
        let mut body = match value {
            Value::Object(body) => body,
            other => {
                return Err(RequestError::NotAnObject {
                    found: json_type_name(&other),
                })
            }
        };

        match body.remove("records") {
            None => Err(RequestError::MissingRecords),
            Some(Value::Array(records)) => Ok(Self { records }),
            Some(other) => Err(RequestError::RecordsNotArray {
                found: json_type_name(&other),
            }),
        }
    }

    /// Number of submitted records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Overall batch status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Every record processed.
    Success,
    /// Some records failed under the isolate policy.
    Partial,
}

/// Response body for `/api/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Batch status.
    pub status: BatchStatus,
    /// Number of records processed successfully.
    pub processed: usize,
    /// Number of failed records; only reported under the isolate policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed: Option<usize>,
    /// Processed records, when result echo is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<OutputRecord>>,
}
