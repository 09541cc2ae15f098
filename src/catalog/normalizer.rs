use super::{Catalog, FilterDimension};
use crate::store::FilterSelection;
use std::collections::HashMap;

/// Maps spoken filter values onto the catalog's canonical spelling.
///
/// Lookups are case-insensitive. A value with no canonical match is passed
/// through unchanged, never dropped.
#[derive(Debug, Clone, Default)]
pub struct ValueNormalizer {
    lookup: HashMap<FilterDimension, HashMap<String, String>>,
}

impl ValueNormalizer {
    pub fn new(catalog: &Catalog) -> Self {
        let mut lookup = HashMap::new();
        for dimension in FilterDimension::ALL {
            let table: HashMap<String, String> = catalog
                .values(dimension)
                .iter()
                .map(|canonical| (canonical.to_lowercase(), canonical.clone()))
                .collect();
            lookup.insert(dimension, table);
        }
        Self { lookup }
    }

    pub fn normalize(&self, dimension: FilterDimension, raw: &str) -> String {
        self.lookup
            .get(&dimension)
            .and_then(|table| table.get(&raw.trim().to_lowercase()))
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn normalize_all(&self, dimension: FilterDimension, raw: &[String]) -> Vec<String> {
        raw.iter().map(|v| self.normalize(dimension, v)).collect()
    }

    /// Normalizes every list of a selection. The price range is untouched.
    pub fn normalize_selection(&self, selection: &FilterSelection) -> FilterSelection {
        let mut normalized = FilterSelection {
            price_range: selection.price_range,
            ..FilterSelection::default()
        };
        for dimension in FilterDimension::ALL {
            *normalized.values_mut(dimension) = self.normalize_all(dimension, selection.values(dimension));
        }
        normalized
    }
}
