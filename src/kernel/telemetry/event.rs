use crate::intent::types::IntentCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ActionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub description: String,
    pub success: bool,
    /// Category the command was routed through. `None` for loop-level
    /// entries such as recognition errors and restarts.
    pub category: Option<IntentCategory>,
}

impl ActionLogEntry {
    pub fn new(description: impl Into<String>, success: bool, category: Option<IntentCategory>) -> Self {
        Self {
            timestamp: Utc::now(),
            description: description.into(),
            success,
            category,
        }
    }
}
