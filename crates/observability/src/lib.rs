//! Tracing/logging setup shared by every shelfwatch binary.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide observability using `SHELFWATCH_LOG_FORMAT`
/// (`json` or `text`, default `json`) and `RUST_LOG` (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
