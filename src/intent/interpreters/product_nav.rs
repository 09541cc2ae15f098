use super::{loose_string, InterpreterContext};
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductReference {
    #[serde(deserialize_with = "loose_string")]
    product: Option<String>,
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let catalog = &ctx.storefront.catalog;
    let products: Vec<String> = catalog.products().iter().map(|p| format!("- {}", p.name)).collect();

    let Ok(reference) = ctx
        .gateway
        .classify_json::<ProductReference>(
            prompts::PRODUCT_NAVIGATION,
            &[("utterance", utterance.as_str()), ("products", &products.join("\n"))],
        )
        .await
    else {
        return Interpretation::not_handled();
    };

    let Some(spoken) = reference.product else {
        return Interpretation::not_handled();
    };
    let Some(product) = catalog.resolve_product(&spoken) else {
        return Interpretation::NotHandled(Some(format!("I couldn't find a product called {}", spoken)));
    };

    info!(product = %product.id, spoken = %spoken, "Opening product");
    ctx.storefront.navigator.navigate(Route::Product(product.id.clone()));
    Interpretation::Handled(format!("Opening {}", product.name))
}
