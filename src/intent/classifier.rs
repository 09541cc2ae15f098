use super::types::{IntentCategory, Utterance};
use crate::services::{prompts, ClassifierGateway, UNKNOWN};
use tracing::{debug, warn};

/// First tier: picks the coarse category that selects an interpreter.
#[derive(Clone)]
pub struct PrimaryClassifier {
    gateway: ClassifierGateway,
    categories: String,
}

impl PrimaryClassifier {
    pub fn new(gateway: ClassifierGateway, categories: &[String]) -> Self {
        Self { gateway, categories: categories.join(", ") }
    }

    /// Never fails: a gateway failure yields `GeneralCommand` so the
    /// dispatcher always has a route to attempt.
    pub async fn classify_primary_intent(&self, utterance: &Utterance) -> IntentCategory {
        let raw = self
            .gateway
            .classify(
                prompts::PRIMARY_INTENT,
                &[("utterance", utterance.as_str()), ("categories", &self.categories)],
            )
            .await;

        if raw == UNKNOWN {
            warn!("Primary classification unavailable, falling back to general_command");
            return IntentCategory::GeneralCommand;
        }

        let category = IntentCategory::from_tag(&raw);
        debug!(category = %category, "Primary intent classified");
        category
    }
}
