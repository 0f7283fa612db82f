//! Application configuration loaded from environment variables.

use serde::Deserialize;

use crate::processor::{BatchPolicy, ProcessorOptions, SanitizeMode};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    // === Processing ===
    /// Per-record fault policy: fail_fast or isolate.
    #[serde(default)]
    pub batch_policy: BatchPolicy,

    /// How `processed_data` is built: single or legacy_repeat.
    #[serde(default)]
    pub sanitize_mode: SanitizeMode,

    /// Echo processed records in the response body.
    #[serde(default)]
    pub include_results: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            rust_log: default_log_level(),
            batch_policy: BatchPolicy::default(),
            sanitize_mode: SanitizeMode::default(),
            include_results: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_body_bytes == 0 {
            return Err("MAX_BODY_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Processing options handed to the request handlers.
    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            policy: self.batch_policy,
            sanitize_mode: self.sanitize_mode,
            include_results: self.include_results,
        }
    }
}
