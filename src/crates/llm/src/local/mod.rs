//! Local completion providers.

mod ollama;

pub use ollama::OllamaClient;
