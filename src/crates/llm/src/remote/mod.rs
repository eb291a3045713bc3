//! Remote completion providers.

mod openai;

pub use openai::OpenAiClient;
