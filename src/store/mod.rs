//! Seams to the storefront application.
//!
//! The interpreter owns no UI, routing or persistence. Everything it changes
//! goes through these traits, so the hosting application decides what a
//! navigation or a filter update actually does.

pub mod memory;
pub mod types;

use crate::catalog::{Catalog, FilterDimension};
use std::sync::Arc;

pub use types::{FilterSelection, PriceRange, ProfileField, ProfileUpdate, Route, UserProfile};

/// Navigation target registry.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
    fn back(&self);
}

/// Read access to the page the shopper is looking at.
pub trait PageState: Send + Sync {
    fn current_route(&self) -> Route;
    /// Presses the page's submit control. Returns false if there is none.
    fn trigger_submit(&self) -> bool;
}

/// Trait for the persisted filter selection.
pub trait FilterStore: Send + Sync {
    fn snapshot(&self) -> FilterSelection;
    fn apply_merge(&self, partial: &FilterSelection);
    fn remove_values(&self, dimension: FilterDimension, values: &[String]);
    fn remove_price_range(&self);
    fn clear_all(&self);
}

/// Trait for the persisted shopper profile.
pub trait ProfileStore: Send + Sync {
    fn read_snapshot(&self) -> UserProfile;
    fn merge_update(&self, update: &ProfileUpdate);
}

/// Controls of the product detail page.
pub trait ProductPage: Send + Sync {
    fn select_size(&self, size: &str) -> bool;
    fn set_quantity(&self, quantity: u32) -> bool;
    fn add_to_cart(&self) -> bool;
}

/// Change notifications for whoever renders feedback.
pub trait Notifier: Send + Sync {
    fn status(&self, message: &str);
    fn profile_updated(&self, summary: &str, fields: &[ProfileField]);
}

/// Handles to every collaborator an interpreter may touch.
#[derive(Clone)]
pub struct Storefront {
    pub catalog: Arc<Catalog>,
    pub navigator: Arc<dyn Navigator>,
    pub page: Arc<dyn PageState>,
    pub filters: Arc<dyn FilterStore>,
    pub profile: Arc<dyn ProfileStore>,
    pub product_page: Arc<dyn ProductPage>,
    pub notifier: Arc<dyn Notifier>,
}
