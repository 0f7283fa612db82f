//! Batch JSON record processing service.
//!
//! Accepts a batch of records over HTTP, sanitizes and validates each one in
//! order, and answers with a summary count.
//!
//! ```text
//! POST /api/process  {"records":[{"id":"1","data":"ab!c","email":"x@y.com"}]}
//!   -> 200           {"status":"success","processed":1}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`processor`]: Record sanitization, validation and batch aggregation
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`system`]: Host information for the health endpoint
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod processor;
pub mod system;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
