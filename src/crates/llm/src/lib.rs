//! Text-completion provider clients for genesis-assistant.
//!
//! The assistant treats its language model as a black-box completion
//! function: a prompt goes in, free text comes out. This crate defines that
//! seam (`CompletionModel`) and provides concrete implementations for local
//! and remote providers, plus a deterministic mock for tests.
//!
//! # Local Providers
//!
//! - **Ollama** - local LLM runner, `/api/generate` endpoint
//!
//! # Remote Providers
//!
//! - **OpenAI-compatible** - any service exposing the `/completions` API
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::local::OllamaClient;
//! use llm::config::LocalLlmConfig;
//! use llm::CompletionModel;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LocalLlmConfig::new("http://localhost:11434", "llama3");
//!     let client = OllamaClient::new(config);
//!
//!     let answer = client.complete("Extract the sensor type: ...").await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mock;

#[cfg(feature = "local")]
pub mod local;

#[cfg(feature = "remote")]
pub mod remote;

pub use config::{LocalLlmConfig, RemoteLlmConfig};
pub use error::{LlmError, Result};
pub use mock::MockCompletion;

use async_trait::async_trait;

/// A black-box text-completion model: prompt in, text out.
///
/// Implementations handle provider-specific request/response formats and
/// authentication. Outputs are potentially noisy free text; callers are
/// responsible for validating them against their expected shape.
///
/// Implementations must be `Send + Sync`; share them as
/// `Arc<dyn CompletionModel>`.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Generate a completion for the given prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
