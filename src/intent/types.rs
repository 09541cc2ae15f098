use serde::{Deserialize, Serialize};
use std::fmt;

/// One finalized recognition result. Lower-cased and trimmed on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse category chosen by the primary classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentCategory {
    Navigation,
    OrderCompletion,
    UserInfo,
    Cart,
    ProductAction,
    ProductNavigation,
    RemoveFilter,
    CategoryNavigation,
    ApplyFilter,
    ClearFilters,
    GeneralCommand,
    /// The classifier answered with a tag outside the known set.
    Unrecognized,
}

impl IntentCategory {
    /// Parses a raw classifier tag. Tolerates surrounding quotes, backticks,
    /// punctuation and case; anything else is `Unrecognized`.
    pub fn from_tag(raw: &str) -> Self {
        let tag = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`' || c == '.' || c.is_whitespace())
            .to_lowercase();
        match tag.as_str() {
            "navigation" => IntentCategory::Navigation,
            "order_completion" => IntentCategory::OrderCompletion,
            "user_info" => IntentCategory::UserInfo,
            "cart" => IntentCategory::Cart,
            "product_action" => IntentCategory::ProductAction,
            "product_navigation" => IntentCategory::ProductNavigation,
            "remove_filter" => IntentCategory::RemoveFilter,
            "category_navigation" => IntentCategory::CategoryNavigation,
            "apply_filter" => IntentCategory::ApplyFilter,
            "clear_filters" => IntentCategory::ClearFilters,
            "general_command" => IntentCategory::GeneralCommand,
            _ => IntentCategory::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntentCategory::Navigation => "navigation",
            IntentCategory::OrderCompletion => "order_completion",
            IntentCategory::UserInfo => "user_info",
            IntentCategory::Cart => "cart",
            IntentCategory::ProductAction => "product_action",
            IntentCategory::ProductNavigation => "product_navigation",
            IntentCategory::RemoveFilter => "remove_filter",
            IntentCategory::CategoryNavigation => "category_navigation",
            IntentCategory::ApplyFilter => "apply_filter",
            IntentCategory::ClearFilters => "clear_filters",
            IntentCategory::GeneralCommand => "general_command",
            IntentCategory::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for IntentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// The command was applied. Carries a status line for the shopper.
    Handled(String),
    /// Nothing actionable. Carries the reason when there is a useful one.
    NotHandled(Option<String>),
}

impl Interpretation {
    pub fn not_handled() -> Self {
        Interpretation::NotHandled(None)
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Interpretation::Handled(_))
    }
}

/// Result of the two filter interpreters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    FiltersUpdated(String),
    Unknown,
}

impl FilterOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOutcome::FiltersUpdated(_) => "filters_updated",
            FilterOutcome::Unknown => "unknown",
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, FilterOutcome::FiltersUpdated(_))
    }
}

impl From<FilterOutcome> for Interpretation {
    fn from(outcome: FilterOutcome) -> Self {
        match outcome {
            FilterOutcome::FiltersUpdated(summary) => Interpretation::Handled(summary),
            FilterOutcome::Unknown => Interpretation::not_handled(),
        }
    }
}
