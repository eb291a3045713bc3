//! Logging utilities
//!
//! Tracing subscriber setup for binaries plus small timing helpers for
//! instrumenting pipeline stages.

use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to the given default
/// directive (e.g. `"info"` or `"genesis=debug"`). Safe to call once per
/// process, typically first thing in `main`.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Log execution time of a future at debug level.
///
/// # Example
///
/// ```rust,ignore
/// use tooling::logging::timed;
///
/// let answer = timed("dispatch", dispatcher.dispatch(op, text)).await;
/// ```
pub async fn timed<F, T>(name: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    debug!("Starting: {}", name);

    let result = future.await;

    let elapsed = start.elapsed();
    debug!("Completed: {} in {:?}", name, elapsed);

    result
}
