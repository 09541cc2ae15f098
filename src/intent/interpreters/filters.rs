use super::{loose_list, loose_number, InterpreterContext};
use crate::catalog::FilterDimension;
use crate::intent::types::{FilterOutcome, Interpretation, Utterance};
use crate::services::prompts;
use crate::store::{FilterSelection, PriceRange};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PricePayload {
    #[serde(deserialize_with = "loose_number")]
    min: Option<f64>,
    #[serde(deserialize_with = "loose_number")]
    max: Option<f64>,
}

impl PricePayload {
    fn into_range(self) -> Option<PriceRange> {
        let (min, max) = match (self.min, self.max) {
            (None, None) => return None,
            (min, max) => (min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY)),
        };
        if min > max {
            Some(PriceRange { min: max, max: min })
        } else {
            Some(PriceRange { min, max })
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FilterPayload {
    #[serde(deserialize_with = "loose_list")]
    colors: Vec<String>,
    #[serde(deserialize_with = "loose_list")]
    sizes: Vec<String>,
    #[serde(deserialize_with = "loose_list")]
    materials: Vec<String>,
    #[serde(deserialize_with = "loose_list")]
    genders: Vec<String>,
    #[serde(deserialize_with = "loose_list")]
    brands: Vec<String>,
    #[serde(deserialize_with = "loose_list")]
    sub_categories: Vec<String>,
    price_range: Option<PricePayload>,
    remove_price: Option<bool>,
}

impl FilterPayload {
    fn into_selection(self) -> FilterSelection {
        FilterSelection {
            colors: self.colors,
            sizes: self.sizes,
            materials: self.materials,
            genders: self.genders,
            brands: self.brands,
            sub_categories: self.sub_categories,
            price_range: self.price_range.and_then(PricePayload::into_range),
        }
    }
}

fn catalog_substitutions(ctx: &InterpreterContext) -> Vec<(&'static str, String)> {
    FilterDimension::ALL
        .iter()
        .map(|d| (d.as_str(), ctx.storefront.catalog.values(*d).join(", ")))
        .collect()
}

/// Adds the filters named in the utterance to the current selection.
pub async fn interpret_filter_command(ctx: &InterpreterContext, utterance: &Utterance) -> FilterOutcome {
    let known = catalog_substitutions(ctx);
    let mut substitutions: Vec<(&str, &str)> = known.iter().map(|(k, v)| (*k, v.as_str())).collect();
    substitutions.push(("utterance", utterance.as_str()));

    let Ok(payload) = ctx
        .gateway
        .classify_json::<FilterPayload>(prompts::APPLY_FILTER, &substitutions)
        .await
    else {
        return FilterOutcome::Unknown;
    };

    let selection = ctx.normalizer.normalize_selection(&payload.into_selection());
    if selection.is_empty() {
        debug!("No filter terms found");
        return FilterOutcome::Unknown;
    }

    ctx.storefront.filters.apply_merge(&selection);
    let summary = format!("Filters applied: {}", selection.describe());
    info!("{}", summary);
    FilterOutcome::FiltersUpdated(summary)
}

/// Removes the named filter values (and optionally the price range) from
/// the current selection. Only values that are actually applied count.
pub async fn interpret_filter_removal(ctx: &InterpreterContext, utterance: &Utterance) -> FilterOutcome {
    let filters = &ctx.storefront.filters;
    let applied = filters.snapshot();
    if applied.is_empty() {
        debug!("Filter removal ignored, nothing applied");
        return FilterOutcome::Unknown;
    }

    let Ok(payload) = ctx
        .gateway
        .classify_json::<FilterPayload>(
            prompts::REMOVE_FILTER,
            &[("utterance", utterance.as_str()), ("applied", &applied.describe())],
        )
        .await
    else {
        return FilterOutcome::Unknown;
    };

    let remove_price = payload.remove_price.unwrap_or(false);
    let requested = payload.into_selection();

    let mut removals: Vec<(FilterDimension, Vec<String>)> = Vec::new();
    for dimension in FilterDimension::ALL {
        let wanted = ctx.normalizer.normalize_all(dimension, requested.values(dimension));
        let present: Vec<String> = applied
            .values(dimension)
            .iter()
            .filter(|v| wanted.iter().any(|w| w.to_lowercase() == v.to_lowercase()))
            .cloned()
            .collect();
        if !present.is_empty() {
            removals.push((dimension, present));
        }
    }
    let drop_price = remove_price && applied.price_range.is_some();

    if removals.is_empty() && !drop_price {
        return FilterOutcome::Unknown;
    }

    let mut removed: Vec<String> = Vec::new();
    for (dimension, values) in removals {
        filters.remove_values(dimension, &values);
        removed.extend(values);
    }
    if drop_price {
        filters.remove_price_range();
        removed.push("price range".to_string());
    }

    let summary = format!("Removed filters: {}", removed.join(", "));
    info!("{}", summary);
    FilterOutcome::FiltersUpdated(summary)
}

/// Drops every filter. Needs no classifier call.
pub fn clear_filters(ctx: &InterpreterContext) -> Interpretation {
    ctx.storefront.filters.clear_all();
    info!("All filters cleared");
    Interpretation::Handled("Cleared all filters".to_string())
}
