use super::{filters, loose_string, InterpreterContext};
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;
use tracing::{debug, info};

/// Phrases that clear every filter without asking the classifier.
pub const CLEAR_FILTER_PHRASES: [&str; 7] = [
    "clear filter",
    "clear all filter",
    "clear the filter",
    "reset filter",
    "reset all filter",
    "remove all filter",
    "start over",
];

/// Named functions the fallback classifier may pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralAction {
    NavigateToCategory(Option<String>),
    GoToCart,
    Checkout,
    ClearFilters,
    GoHome,
    GoBack,
}

const REGISTRY: [(&str, &str); 6] = [
    ("navigateToCategory", "open a product category; argument is the category"),
    ("goToCart", "open the shopping cart"),
    ("checkout", "go to the payment page"),
    ("clearFilters", "remove every applied filter"),
    ("goHome", "open the home page"),
    ("goBack", "return to the previous page"),
];

impl GeneralAction {
    pub fn from_call(function: &str, argument: Option<String>) -> Option<Self> {
        let action = match function.trim().to_lowercase().as_str() {
            "navigatetocategory" => GeneralAction::NavigateToCategory(argument),
            "gotocart" => GeneralAction::GoToCart,
            "checkout" => GeneralAction::Checkout,
            "clearfilters" => GeneralAction::ClearFilters,
            "gohome" => GeneralAction::GoHome,
            "goback" => GeneralAction::GoBack,
            _ => return None,
        };
        Some(action)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FunctionCall {
    #[serde(deserialize_with = "loose_string")]
    function: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    argument: Option<String>,
}

pub fn matches_clear_phrase(utterance: &Utterance) -> bool {
    CLEAR_FILTER_PHRASES.iter().any(|phrase| utterance.as_str().contains(phrase))
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    if matches_clear_phrase(utterance) {
        debug!("Clear-filter phrase matched, skipping classifier");
        return filters::clear_filters(ctx);
    }

    let functions: Vec<String> = REGISTRY.iter().map(|(name, about)| format!("- {}: {}", name, about)).collect();
    let Ok(call) = ctx
        .gateway
        .classify_json::<FunctionCall>(
            prompts::GENERAL_COMMAND,
            &[("utterance", utterance.as_str()), ("functions", &functions.join("\n"))],
        )
        .await
    else {
        return Interpretation::not_handled();
    };

    let Some(action) = call.function.as_deref().and_then(|f| GeneralAction::from_call(f, call.argument.clone())) else {
        return Interpretation::not_handled();
    };
    info!(action = ?action, "General command");

    let storefront = &ctx.storefront;
    match action {
        GeneralAction::NavigateToCategory(argument) => {
            match argument.as_deref().and_then(|a| storefront.catalog.find_category(a)) {
                Some(key) => {
                    storefront.navigator.navigate(Route::Category(key.to_string()));
                    Interpretation::Handled(format!("Showing {} products", key))
                }
                None => Interpretation::not_handled(),
            }
        }
        GeneralAction::GoToCart => {
            storefront.navigator.navigate(Route::Cart);
            Interpretation::Handled("Opening your cart".to_string())
        }
        GeneralAction::Checkout => {
            storefront.navigator.navigate(Route::Payment);
            Interpretation::Handled("Proceeding to checkout".to_string())
        }
        GeneralAction::ClearFilters => filters::clear_filters(ctx),
        GeneralAction::GoHome => {
            storefront.navigator.navigate(Route::Home);
            Interpretation::Handled("Going to the home page".to_string())
        }
        GeneralAction::GoBack => {
            storefront.navigator.back();
            Interpretation::Handled("Going back".to_string())
        }
    }
}
