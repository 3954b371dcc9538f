//! Structured logging using **tracing**.
//!
//! Library code only emits events (`debug!` per file, `info!` per phase,
//! `warn!` for degraded results). Binaries install the subscriber once.

/// Initializes the global tracing collector (subscriber).
///
/// This should be called *once* at the beginning of the application's runtime.
/// It configures structured JSON output to stderr so that stdout stays free
/// for rendered tables.
///
/// # Environment Variables
/// - `RUST_LOG`: Controls log filtering (e.g., `RUST_LOG=rocqstat_core=debug`)
pub fn init_structured_logging() {
    // try_init: a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .json()
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_current_span(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}
