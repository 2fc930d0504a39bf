//! Logging bootstrap.

use tracing_subscriber::EnvFilter;

/// Initialize global tracing output.
///
/// Honors `RUST_LOG`; falls back to `provlite=info`. Safe to call more than
/// once; later calls are no-ops.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("provlite=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .try_init();
}
