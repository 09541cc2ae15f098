use crate::catalog::FilterDimension;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// The filters applied to the current product listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
    pub genders: Vec<String>,
    pub brands: Vec<String>,
    pub sub_categories: Vec<String>,
    pub price_range: Option<PriceRange>,
}

impl FilterSelection {
    pub fn values(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Colors => &self.colors,
            FilterDimension::Sizes => &self.sizes,
            FilterDimension::Materials => &self.materials,
            FilterDimension::Genders => &self.genders,
            FilterDimension::Brands => &self.brands,
            FilterDimension::SubCategories => &self.sub_categories,
        }
    }

    pub fn values_mut(&mut self, dimension: FilterDimension) -> &mut Vec<String> {
        match dimension {
            FilterDimension::Colors => &mut self.colors,
            FilterDimension::Sizes => &mut self.sizes,
            FilterDimension::Materials => &mut self.materials,
            FilterDimension::Genders => &mut self.genders,
            FilterDimension::Brands => &mut self.brands,
            FilterDimension::SubCategories => &mut self.sub_categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.price_range.is_none() && FilterDimension::ALL.iter().all(|d| self.values(*d).is_empty())
    }

    /// Additive merge: ordered union per dimension, compared
    /// case-insensitively like [`remove_values`](Self::remove_values). A
    /// price range in `other` replaces the current one.
    pub fn merge(&mut self, other: &FilterSelection) {
        for dimension in FilterDimension::ALL {
            let current = self.values_mut(dimension);
            for value in other.values(dimension) {
                let lowered = value.to_lowercase();
                if !current.iter().any(|applied| applied.to_lowercase() == lowered) {
                    current.push(value.clone());
                }
            }
        }
        if other.price_range.is_some() {
            self.price_range = other.price_range;
        }
    }

    /// Removes the given values (case-insensitive) and returns the ones that
    /// were actually applied.
    pub fn remove_values(&mut self, dimension: FilterDimension, values: &[String]) -> Vec<String> {
        let targets: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
        let mut removed = Vec::new();
        self.values_mut(dimension).retain(|applied| {
            if targets.contains(&applied.to_lowercase()) {
                removed.push(applied.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    /// Describes the selection for status messages, e.g. `colors: Red, Blue`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = FilterDimension::ALL
            .iter()
            .filter(|d| !self.values(**d).is_empty())
            .map(|d| format!("{}: {}", d, self.values(*d).join(", ")))
            .collect();
        if let Some(range) = self.price_range {
            if range.max.is_finite() {
                parts.push(format!("price: {}-{}", range.min, range.max));
            } else {
                parts.push(format!("price: over {}", range.min));
            }
        }
        parts.join("; ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileField {
    Name,
    Email,
    Address,
    Phone,
    CardHolder,
    CardNumber,
    Expiry,
    Cvv,
}

impl ProfileField {
    pub const ALL: [ProfileField; 8] = [
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Address,
        ProfileField::Phone,
        ProfileField::CardHolder,
        ProfileField::CardNumber,
        ProfileField::Expiry,
        ProfileField::Cvv,
    ];

    /// Fields the payment page needs before an order can be submitted.
    pub const CHECKOUT_REQUIRED: [ProfileField; 6] = [
        ProfileField::CardNumber,
        ProfileField::Expiry,
        ProfileField::Cvv,
        ProfileField::Name,
        ProfileField::Email,
        ProfileField::Address,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Address => "address",
            ProfileField::Phone => "phone",
            ProfileField::CardHolder => "cardholder name",
            ProfileField::CardNumber => "card number",
            ProfileField::Expiry => "expiry date",
            ProfileField::Cvv => "CVV",
        }
    }

    pub fn is_sensitive(&self) -> bool {
        matches!(self, ProfileField::CardNumber | ProfileField::Cvv)
    }

    /// Value safe to write to logs.
    pub fn loggable<'a>(&self, value: &'a str) -> &'a str {
        if self.is_sensitive() {
            "****"
        } else {
            value
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shopper details. Every field is optional; blank strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub card_holder: Option<String>,
    pub card_number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
}

/// A partial profile: only the fields that are present get written.
pub type ProfileUpdate = UserProfile;

impl UserProfile {
    fn slot(&self, field: ProfileField) -> &Option<String> {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Email => &self.email,
            ProfileField::Address => &self.address,
            ProfileField::Phone => &self.phone,
            ProfileField::CardHolder => &self.card_holder,
            ProfileField::CardNumber => &self.card_number,
            ProfileField::Expiry => &self.expiry,
            ProfileField::Cvv => &self.cvv,
        }
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut Option<String> {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Email => &mut self.email,
            ProfileField::Address => &mut self.address,
            ProfileField::Phone => &mut self.phone,
            ProfileField::CardHolder => &mut self.card_holder,
            ProfileField::CardNumber => &mut self.card_number,
            ProfileField::Expiry => &mut self.expiry,
            ProfileField::Cvv => &mut self.cvv,
        }
    }

    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.slot(field).as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// Fields carrying a non-blank value.
    pub fn present_fields(&self) -> Vec<ProfileField> {
        ProfileField::ALL.into_iter().filter(|f| self.get(*f).is_some()).collect()
    }

    pub fn missing(&self, required: &[ProfileField]) -> Vec<ProfileField> {
        required.iter().copied().filter(|f| self.get(*f).is_none()).collect()
    }

    /// Writes every present field of `update` and returns the fields whose
    /// stored value changed. Absent fields keep their prior value.
    pub fn merge(&mut self, update: &ProfileUpdate) -> Vec<ProfileField> {
        let mut changed = Vec::new();
        for field in update.present_fields() {
            let Some(value) = update.get(field) else { continue };
            if self.get(field) != Some(value) {
                *self.slot_mut(field) = Some(value.to_string());
                changed.push(field);
            }
        }
        changed
    }
}

/// Named destinations of the navigation registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Cart,
    Payment,
    Confirmation,
    Category(String),
    Product(String),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("home"),
            Route::Cart => f.write_str("cart"),
            Route::Payment => f.write_str("payment"),
            Route::Confirmation => f.write_str("confirmation"),
            Route::Category(key) => write!(f, "{} category", key),
            Route::Product(id) => write!(f, "product {}", id),
        }
    }
}
