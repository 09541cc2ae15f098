use super::{loose_string, InterpreterContext};
use crate::intent::types::{Interpretation, Utterance};
use crate::services::prompts;
use crate::store::Route;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryReference {
    #[serde(deserialize_with = "loose_string")]
    category: Option<String>,
}

pub async fn interpret(ctx: &InterpreterContext, utterance: &Utterance) -> Interpretation {
    let catalog = &ctx.storefront.catalog;
    let Ok(reference) = ctx
        .gateway
        .classify_json::<CategoryReference>(
            prompts::CATEGORY_NAVIGATION,
            &[("utterance", utterance.as_str()), ("categories", &catalog.categories().join(", "))],
        )
        .await
    else {
        return Interpretation::not_handled();
    };

    match reference.category.as_deref().and_then(|c| catalog.find_category(c)) {
        Some(key) => {
            ctx.storefront.navigator.navigate(Route::Category(key.to_string()));
            Interpretation::Handled(format!("Showing {} products", key))
        }
        None => Interpretation::not_handled(),
    }
}
