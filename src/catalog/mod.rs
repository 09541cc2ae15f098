pub mod data;
pub mod normalizer;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use normalizer::ValueNormalizer;

/// The filterable dimensions of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Colors,
    Sizes,
    Materials,
    Genders,
    Brands,
    SubCategories,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 6] = [
        FilterDimension::Colors,
        FilterDimension::Sizes,
        FilterDimension::Materials,
        FilterDimension::Genders,
        FilterDimension::Brands,
        FilterDimension::SubCategories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterDimension::Colors => "colors",
            FilterDimension::Sizes => "sizes",
            FilterDimension::Materials => "materials",
            FilterDimension::Genders => "genders",
            FilterDimension::Brands => "brands",
            FilterDimension::SubCategories => "subCategories",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub sizes: Vec<String>,
}

/// Read-only product catalog: canonical filter values, products and the
/// category keys the navigator understands.
#[derive(Debug, Clone)]
pub struct Catalog {
    values: HashMap<FilterDimension, Vec<String>>,
    products: Vec<Product>,
    categories: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::storefront()
    }
}

impl Catalog {
    pub fn new(
        values: HashMap<FilterDimension, Vec<String>>,
        products: Vec<Product>,
        categories: Vec<String>,
    ) -> Self {
        Self { values, products, categories }
    }

    /// The stock storefront data set.
    pub fn storefront() -> Self {
        Self::new(data::filter_values(), data::products(), data::categories())
    }

    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        self.values.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn find_category(&self, spoken: &str) -> Option<&str> {
        let needle = spoken.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.categories
            .iter()
            .find(|c| c.to_lowercase() == needle)
            .map(String::as_str)
    }

    /// Resolves a spoken product reference. Strategies run in order and the
    /// first product matched by the earliest strategy wins:
    /// exact name, substring containment (either direction), then keyword
    /// overlap on whole name words longer than 3 characters.
    pub fn resolve_product(&self, spoken: &str) -> Option<&Product> {
        let spoken = spoken.trim().to_lowercase();
        if spoken.is_empty() {
            return None;
        }

        if let Some(p) = self.products.iter().find(|p| p.name.to_lowercase() == spoken) {
            return Some(p);
        }

        if let Some(p) = self.products.iter().find(|p| {
            let name = p.name.to_lowercase();
            name.contains(&spoken) || spoken.contains(&name)
        }) {
            return Some(p);
        }

        let spoken_words: Vec<&str> = spoken
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        self.products.iter().find(|p| {
            p.name
                .to_lowercase()
                .split_whitespace()
                .filter(|word| word.chars().count() > 3)
                .any(|word| spoken_words.contains(&word))
        })
    }
}
