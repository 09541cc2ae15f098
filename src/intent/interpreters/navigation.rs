use super::InterpreterContext;
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum NavigationAction {
    Back,
    Home,
    Cart,
    Payment,
    #[serde(other)]
    None,
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let action = match ctx
        .gateway
        .classify_json::<NavigationAction>(prompts::NAVIGATION, &[("utterance", utterance.as_str())])
        .await
    {
        Ok(action) => action,
        Err(_) => return Interpretation::not_handled(),
    };

    let navigator = &ctx.storefront.navigator;
    let summary = match action {
        NavigationAction::Back => {
            navigator.back();
            "Going back".to_string()
        }
        NavigationAction::Home => {
            navigator.navigate(Route::Home);
            "Going to the home page".to_string()
        }
        NavigationAction::Cart => {
            navigator.navigate(Route::Cart);
            "Opening your cart".to_string()
        }
        NavigationAction::Payment => {
            navigator.navigate(Route::Payment);
            "Opening the payment page".to_string()
        }
        NavigationAction::None => return Interpretation::not_handled(),
    };

    info!("Navigation: {}", summary);
    Interpretation::Handled(summary)
}
