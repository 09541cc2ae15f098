use super::InterpreterContext;
use crate::intent::types::{Interpretation, Utterance};
use crate::store::{ProfileField, Route};
use tracing::{info, warn};

/// Order completion. Decided from page state and the stored profile alone;
/// the category already says the shopper wants to finish the order.
pub async fn interpret(ctx: &InterpreterContext, _utterance: &Utterance) -> Interpretation {
    let storefront = &ctx.storefront;

    if storefront.page.current_route() != Route::Payment {
        storefront.navigator.navigate(Route::Payment);
        return Interpretation::Handled("Taking you to the payment page".to_string());
    }

    let profile = storefront.profile.read_snapshot();
    let missing = profile.missing(&ProfileField::CHECKOUT_REQUIRED);
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(ProfileField::label).collect();
        warn!(missing = ?labels, "Order not submitted, profile incomplete");
        return Interpretation::NotHandled(Some(format!(
            "Before placing the order I still need your {}",
            labels.join(", ")
        )));
    }

    if storefront.page.trigger_submit() {
        info!("Order submitted");
        Interpretation::Handled("Placing your order".to_string())
    } else {
        info!("No submit control on the payment page, going to confirmation");
        storefront.navigator.navigate(Route::Confirmation);
        Interpretation::Handled("Completing your order".to_string())
    }
}
