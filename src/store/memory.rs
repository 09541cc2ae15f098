use super::{
    FilterSelection, FilterStore, Navigator, Notifier, PageState, ProductPage, ProfileField,
    ProfileStore, ProfileUpdate, Route, Storefront, UserProfile,
};
use crate::catalog::{Catalog, FilterDimension};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory filter selection.
#[derive(Debug, Default)]
pub struct InMemoryFilterStore {
    selection: Mutex<FilterSelection>,
}

impl InMemoryFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(selection: FilterSelection) -> Self {
        Self { selection: Mutex::new(selection) }
    }
}

impl FilterStore for InMemoryFilterStore {
    fn snapshot(&self) -> FilterSelection {
        lock(&self.selection).clone()
    }

    fn apply_merge(&self, partial: &FilterSelection) {
        lock(&self.selection).merge(partial);
    }

    fn remove_values(&self, dimension: FilterDimension, values: &[String]) {
        lock(&self.selection).remove_values(dimension, values);
    }

    fn remove_price_range(&self) {
        lock(&self.selection).price_range = None;
    }

    fn clear_all(&self) {
        *lock(&self.selection) = FilterSelection::default();
    }
}

/// In-memory shopper profile.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profile: Mutex<UserProfile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self { profile: Mutex::new(profile) }
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn read_snapshot(&self) -> UserProfile {
        lock(&self.profile).clone()
    }

    fn merge_update(&self, update: &ProfileUpdate) {
        lock(&self.profile).merge(update);
    }
}

#[derive(Debug)]
struct PageInner {
    current: Route,
    history: Vec<Route>,
    navigations: Vec<Route>,
    backs: u32,
    submit_control: bool,
    submits: u32,
}

/// Router plus page state for a single tab.
#[derive(Debug)]
pub struct InMemoryPage {
    inner: Mutex<PageInner>,
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl InMemoryPage {
    pub fn new(start: Route) -> Self {
        Self {
            inner: Mutex::new(PageInner {
                current: start,
                history: Vec::new(),
                navigations: Vec::new(),
                backs: 0,
                submit_control: true,
                submits: 0,
            }),
        }
    }

    pub fn with_submit_control(self, present: bool) -> Self {
        lock(&self.inner).submit_control = present;
        self
    }

    pub fn route(&self) -> Route {
        lock(&self.inner).current.clone()
    }

    /// Every `navigate` call, in order.
    pub fn navigations(&self) -> Vec<Route> {
        lock(&self.inner).navigations.clone()
    }

    pub fn back_count(&self) -> u32 {
        lock(&self.inner).backs
    }

    pub fn submit_count(&self) -> u32 {
        lock(&self.inner).submits
    }
}

impl Navigator for InMemoryPage {
    fn navigate(&self, route: Route) {
        let mut inner = lock(&self.inner);
        let previous = std::mem::replace(&mut inner.current, route.clone());
        inner.history.push(previous);
        inner.navigations.push(route);
    }

    fn back(&self) {
        let mut inner = lock(&self.inner);
        inner.backs += 1;
        if let Some(previous) = inner.history.pop() {
            inner.current = previous;
        }
    }
}

impl PageState for InMemoryPage {
    fn current_route(&self) -> Route {
        self.route()
    }

    fn trigger_submit(&self) -> bool {
        let mut inner = lock(&self.inner);
        if !inner.submit_control {
            return false;
        }
        inner.submits += 1;
        true
    }
}

#[derive(Debug)]
struct ProductPageInner {
    size: Option<String>,
    quantity: u32,
    cart_adds: u32,
}

/// Product detail page controls.
#[derive(Debug)]
pub struct InMemoryProductPage {
    inner: Mutex<ProductPageInner>,
}

impl Default for InMemoryProductPage {
    fn default() -> Self {
        Self {
            inner: Mutex::new(ProductPageInner { size: None, quantity: 1, cart_adds: 0 }),
        }
    }
}

impl InMemoryProductPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_size(&self) -> Option<String> {
        lock(&self.inner).size.clone()
    }

    pub fn quantity(&self) -> u32 {
        lock(&self.inner).quantity
    }

    pub fn cart_adds(&self) -> u32 {
        lock(&self.inner).cart_adds
    }
}

impl ProductPage for InMemoryProductPage {
    fn select_size(&self, size: &str) -> bool {
        lock(&self.inner).size = Some(size.to_string());
        true
    }

    fn set_quantity(&self, quantity: u32) -> bool {
        lock(&self.inner).quantity = quantity;
        true
    }

    fn add_to_cart(&self) -> bool {
        lock(&self.inner).cart_adds += 1;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Status(String),
    ProfileUpdated { summary: String, fields: Vec<ProfileField> },
}

/// Keeps every notice for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .filter_map(|n| match n {
                Notice::Status(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn status(&self, message: &str) {
        lock(&self.notices).push(Notice::Status(message.to_string()));
    }

    fn profile_updated(&self, summary: &str, fields: &[ProfileField]) {
        lock(&self.notices).push(Notice::ProfileUpdated {
            summary: summary.to_string(),
            fields: fields.to_vec(),
        });
    }
}

/// Writes notices to the log. Used by the console driver.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn status(&self, message: &str) {
        info!(target: "voxcart::status", "{}", message);
    }

    fn profile_updated(&self, summary: &str, fields: &[ProfileField]) {
        let names: Vec<&str> = fields.iter().map(ProfileField::label).collect();
        info!(target: "voxcart::status", fields = ?names, "{}", summary);
    }
}

/// A full set of in-memory collaborators with typed handles kept for
/// inspection.
#[derive(Clone, Default)]
pub struct InMemoryStorefront {
    pub catalog: Arc<Catalog>,
    pub page: Arc<InMemoryPage>,
    pub filters: Arc<InMemoryFilterStore>,
    pub profile: Arc<InMemoryProfileStore>,
    pub product_page: Arc<InMemoryProductPage>,
    pub notifier: Arc<RecordingNotifier>,
}

impl InMemoryStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, page: InMemoryPage) -> Self {
        self.page = Arc::new(page);
        self
    }

    pub fn with_filters(mut self, selection: FilterSelection) -> Self {
        self.filters = Arc::new(InMemoryFilterStore::with_selection(selection));
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = Arc::new(InMemoryProfileStore::with_profile(profile));
        self
    }

    pub fn storefront(&self) -> Storefront {
        Storefront {
            catalog: self.catalog.clone(),
            navigator: self.page.clone(),
            page: self.page.clone(),
            filters: self.filters.clone(),
            profile: self.profile.clone(),
            product_page: self.product_page.clone(),
            notifier: self.notifier.clone(),
        }
    }
}
