use super::InterpreterContext;
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CartAction {
    ViewCart,
    Checkout,
    ContinueShopping,
    #[serde(other)]
    None,
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let Ok(action) = ctx
        .gateway
        .classify_json::<CartAction>(prompts::CART, &[("utterance", utterance.as_str())])
        .await
    else {
        return Interpretation::not_handled();
    };

    let (route, summary) = match action {
        CartAction::ViewCart => (Route::Cart, "Opening your cart"),
        CartAction::Checkout => (Route::Payment, "Proceeding to checkout"),
        CartAction::ContinueShopping => (Route::Home, "Back to shopping"),
        CartAction::None => return Interpretation::not_handled(),
    };
    ctx.storefront.navigator.navigate(route);
    Interpretation::Handled(summary.to_string())
}
