//! Ambient helpers shared across the genesis-assistant workspace.
//!
//! # Modules
//!
//! - `config` - Configuration management with environment variable loading
//! - `logging` - Tracing subscriber setup and timing helpers

pub mod config;
pub mod logging;

use thiserror::Error;

/// Error raised by configuration loading and validation.
#[derive(Debug, Error)]
pub enum ToolingError {
    #[error("Tooling error: {0}")]
    General(String),
}

/// Result type for tooling operations.
pub type Result<T> = std::result::Result<T, ToolingError>;

/// Workspace version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
