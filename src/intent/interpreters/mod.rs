//! Per-category interpreters.
//!
//! Each interpreter checks its page preconditions before touching the
//! gateway, makes at most one gateway call, and either applies a complete
//! mutation or none at all. Gateway and parse failures come back as "not
//! handled", never as errors.

pub mod cart;
pub mod category;
pub mod filters;
pub mod general;
pub mod navigation;
pub mod order;
pub mod product;
pub mod product_nav;
pub mod user_info;

use crate::catalog::ValueNormalizer;
use crate::services::ClassifierGateway;
use crate::store::Storefront;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Everything an interpreter needs, built once per dispatcher.
#[derive(Clone)]
pub struct InterpreterContext {
    pub gateway: ClassifierGateway,
    pub storefront: Storefront,
    pub normalizer: ValueNormalizer,
}

impl InterpreterContext {
    pub fn new(gateway: ClassifierGateway, storefront: Storefront) -> Self {
        let normalizer = ValueNormalizer::new(&storefront.catalog);
        Self { gateway, storefront, normalizer }
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Accepts a list, a single scalar or null.
pub(crate) fn loose_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
    })
}

/// Accepts a string or a number; blank and null become `None`.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

/// Accepts a number or a numeric string such as `"$50"`.
pub(crate) fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    })
}
