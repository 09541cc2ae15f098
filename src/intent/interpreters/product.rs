use super::{loose_string, InterpreterContext};
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ProductAction {
    Size {
        #[serde(default, deserialize_with = "loose_string")]
        value: Option<String>,
    },
    Quantity {
        #[serde(default, deserialize_with = "loose_string")]
        value: Option<String>,
    },
    AddToCart,
    #[serde(other)]
    None,
}

/// Size, quantity and add-to-cart on a product detail page. A no-op on any
/// other page.
pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let storefront = &ctx.storefront;
    let Route::Product(product_id) = storefront.page.current_route() else {
        debug!("Product action ignored, not on a product page");
        return Interpretation::not_handled();
    };
    let Some(product) = storefront.catalog.product(&product_id) else {
        return Interpretation::not_handled();
    };

    let sizes = if product.sizes.is_empty() { "none".to_string() } else { product.sizes.join(", ") };
    let Ok(action) = ctx
        .gateway
        .classify_json::<ProductAction>(
            prompts::PRODUCT_ACTION,
            &[("utterance", utterance.as_str()), ("product", &product.name), ("sizes", &sizes)],
        )
        .await
    else {
        return Interpretation::not_handled();
    };

    let page = &storefront.product_page;
    match action {
        ProductAction::Size { value: Some(spoken) } => {
            let wanted = spoken.to_lowercase();
            let Some(size) = product.sizes.iter().find(|s| s.to_lowercase() == wanted) else {
                return Interpretation::NotHandled(Some(format!("{} is not available in size {}", product.name, spoken)));
            };
            if !page.select_size(size) {
                return Interpretation::not_handled();
            }
            info!(product = %product.id, size = %size, "Size selected");
            Interpretation::Handled(format!("Selected size {}", size))
        }
        ProductAction::Quantity { value: Some(raw) } => {
            let quantity = match raw.parse::<f64>() {
                Ok(q) if q >= 1.0 && q.fract() == 0.0 && q <= u32::MAX as f64 => q as u32,
                _ => return Interpretation::not_handled(),
            };
            if !page.set_quantity(quantity) {
                return Interpretation::not_handled();
            }
            Interpretation::Handled(format!("Quantity set to {}", quantity))
        }
        ProductAction::AddToCart => {
            if !page.add_to_cart() {
                return Interpretation::not_handled();
            }
            info!(product = %product.id, "Added to cart");
            Interpretation::Handled(format!("Added {} to your cart", product.name))
        }
        ProductAction::Size { value: None } | ProductAction::Quantity { value: None } | ProductAction::None => {
            Interpretation::not_handled()
        }
    }
}
