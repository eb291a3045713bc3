//! Deterministic completion mock for tests.
//!
//! Extraction and routing logic must be testable without a live model, so
//! the mock replays a queue of canned responses in order.

use crate::error::{LlmError, Result};
use crate::CompletionModel;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A `CompletionModel` that replays canned responses in FIFO order.
///
/// Panics are avoided: an exhausted queue yields an error, the same way a
/// misbehaving provider would.
#[derive(Default)]
pub struct MockCompletion {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    /// Create a mock with a queue of responses.
    pub fn new(responses: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Append a response to the queue.
    pub fn push(&self, response: impl Into<String>) {
        self.responses.lock().unwrap().push_back(response.into());
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::ServiceUnavailable("mock response queue empty".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order() {
        let mock = MockCompletion::new(["first", "second"]);
        assert_eq!(mock.complete("a").await.unwrap(), "first");
        assert_eq!(mock.complete("b").await.unwrap(), "second");
        assert_eq!(mock.prompts(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_exhausted_queue_errors() {
        let mock = MockCompletion::new(Vec::<String>::new());
        assert!(mock.complete("a").await.is_err());
    }
}
