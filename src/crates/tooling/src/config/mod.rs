//! Configuration management utilities
//!
//! Common patterns for configuration across the workspace:
//!
//! - `ConfigBuilder` trait for consistent configuration APIs
//! - Environment variable loading with proper error handling
//!
//! Settings structs are built once at process start from prefixed environment
//! variables and passed into the components that need them; there are no
//! global cached getters.

mod builder;
mod env;

pub use builder::ConfigBuilder;
pub use env::{get_env, get_env_bool, get_env_or, get_env_parse};
