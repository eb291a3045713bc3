//! Operation selection from free text.
//!
//! The router only ever picks from the static operation registry; the model
//! is asked to name one row and anything else falls back to keyword rules,
//! so routing can never invent an operation.

use crate::dispatch::{Operation, OPERATIONS};
use async_trait::async_trait;
use llm::CompletionModel;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides which operation a piece of free text is asking for.
#[async_trait]
pub trait OperationRouter: Send + Sync {
    async fn route(&self, text: &str) -> Operation;
}

/// Rule-based routing over query keywords. Used standalone in tests and as
/// the fallback when the model reply names no registry row.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRouter;

impl KeywordRouter {
    pub fn new() -> Self {
        KeywordRouter
    }

    fn pick(text: &str) -> Operation {
        let text = text.to_lowercase();
        let has = |needle: &str| text.contains(needle);

        if has("summary") || has("overview") {
            Operation::LocationSummary
        } else if has("report") || has("history") || has("readings") || has("yesterday") || has("last ")
        {
            Operation::SensorReport
        } else if (has("warehouse") || has("location")) && has("unit") {
            Operation::WarehouseUnits
        } else if has("unit") && has("sensor") {
            Operation::UnitSensors
        } else if has("warehouse") && has("sensor") {
            Operation::WarehouseSensors
        } else if has("list") && has("sensor") {
            Operation::SensorList
        } else if has("warehouses") || has("locations") || (has("list") && has("location")) {
            Operation::LocationList
        } else if has("unit") {
            Operation::UnitStatus
        } else {
            Operation::SensorStatus
        }
    }
}

#[async_trait]
impl OperationRouter for KeywordRouter {
    async fn route(&self, text: &str) -> Operation {
        let operation = Self::pick(text);
        debug!(operation = %operation, "keyword-routed");
        operation
    }
}

/// Model-backed router: renders the registry into a selection prompt and
/// parses the reply back through the registry.
pub struct LlmRouter {
    model: Arc<dyn CompletionModel>,
    fallback: KeywordRouter,
}

impl LlmRouter {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            fallback: KeywordRouter::new(),
        }
    }

    fn selection_prompt(text: &str) -> String {
        let mut table = String::new();
        for spec in OPERATIONS {
            table.push_str(&format!("- {}: {}\n", spec.name, spec.description));
        }
        format!(
            "You classify user queries about an IoT warehouse monitoring system.\n\
             Operations:\n{table}\n\
             Reply with exactly one operation name from the list above and nothing else.\n\n\
             Query: {text}\n\
             Operation:"
        )
    }

    /// Scan the reply for the first registry name it contains.
    fn parse_reply(reply: &str) -> Option<Operation> {
        let reply = reply.trim().to_lowercase();
        if let Some(operation) = Operation::from_name(&reply) {
            return Some(operation);
        }
        OPERATIONS
            .iter()
            .find(|spec| reply.contains(spec.name))
            .map(|spec| spec.operation)
    }
}

#[async_trait]
impl OperationRouter for LlmRouter {
    async fn route(&self, text: &str) -> Operation {
        match self.model.complete(&Self::selection_prompt(text)).await {
            Ok(reply) => match Self::parse_reply(&reply) {
                Some(operation) => {
                    debug!(operation = %operation, "model-routed");
                    operation
                }
                None => {
                    warn!(reply = %reply, "model named no operation, falling back");
                    self.fallback.route(text).await
                }
            },
            Err(e) => {
                warn!(error = %e, "routing model failed, falling back");
                self.fallback.route(text).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm::MockCompletion;

    #[tokio::test]
    async fn test_keyword_router_rules() {
        let router = KeywordRouter::new();
        assert_eq!(
            router.route("Is the temperature okay in Verna?").await,
            Operation::SensorStatus
        );
        assert_eq!(
            router.route("temperature report for yesterday").await,
            Operation::SensorReport
        );
        assert_eq!(router.route("give me the warehouse summary").await, Operation::LocationSummary);
        assert_eq!(router.route("list all sensors").await, Operation::SensorList);
        assert_eq!(router.route("which warehouses do we have").await, Operation::LocationList);
        assert_eq!(router.route("status of the cold room unit").await, Operation::UnitStatus);
    }

    #[tokio::test]
    async fn test_llm_router_takes_model_pick() {
        let model = MockCompletion::new(vec!["warehouse_sensors".to_string()]);
        let router = LlmRouter::new(Arc::new(model));
        assert_eq!(router.route("show me everything in Verna").await, Operation::WarehouseSensors);
    }

    #[tokio::test]
    async fn test_llm_router_parses_noisy_reply() {
        let model = MockCompletion::new(vec![
            "I think the best fit is `unit_status` here.".to_string(),
        ]);
        let router = LlmRouter::new(Arc::new(model));
        assert_eq!(router.route("how is the cold room doing").await, Operation::UnitStatus);
    }

    #[tokio::test]
    async fn test_llm_router_falls_back_on_noise() {
        let model = MockCompletion::new(vec!["42".to_string()]);
        let router = LlmRouter::new(Arc::new(model));
        assert_eq!(
            router.route("humidity report for last week").await,
            Operation::SensorReport
        );
    }

    #[test]
    fn test_selection_prompt_lists_every_operation() {
        let prompt = LlmRouter::selection_prompt("anything");
        for spec in OPERATIONS {
            assert!(prompt.contains(spec.name), "missing {}", spec.name);
        }
    }
}
