//! Host and process information for the health endpoint.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use sysinfo::System;

const BYTES_PER_MB: u64 = 1024 * 1024;

static SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| Mutex::new(System::new()));

/// Service name and version.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rust toolchain line the binary targets.
pub fn runtime_version() -> String {
    format!("rust/{}", env!("CARGO_PKG_RUST_VERSION"))
}

/// CPU architecture the binary was built for.
pub fn architecture() -> &'static str {
    std::env::consts::ARCH
}

/// Number of logical processors available to this process.
pub fn available_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Point-in-time memory figures, in megabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Memory available for new allocations.
    pub free_mb: u64,
    /// Total installed memory.
    pub total_mb: u64,
}

/// Refresh and read memory figures.
pub fn memory_snapshot() -> MemorySnapshot {
    let mut sys = SYSTEM.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    sys.refresh_memory();

    MemorySnapshot {
        free_mb: sys.available_memory() / BYTES_PER_MB,
        total_mb: sys.total_memory() / BYTES_PER_MB,
    }
}
