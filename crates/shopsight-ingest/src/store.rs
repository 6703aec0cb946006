//! The catalog store: one immutable-per-load product list plus the session's
//! filter state.
//!
//! Loading runs the provider and row normalization on a blocking task, then
//! swaps the published list inside a single write-lock critical section, so
//! readers observe either the pre-load state or the fully-loaded state and
//! never a partial list. A failed load publishes an empty catalog — an
//! empty list is a valid terminal state, not an error state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use shopsight_core::{FilterState, Product};

use crate::normalize::parse_catalog;
use crate::source::CatalogSource;

pub struct CatalogStore {
    inner: RwLock<Inner>,
    loading: AtomicBool,
}

struct Inner {
    products: Arc<Vec<Product>>,
    filters: FilterState,
    loaded_at: Option<DateTime<Utc>>,
    completed_loads: u64,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                products: Arc::new(Vec::new()),
                filters: FilterState::default(),
                loaded_at: None,
                completed_loads: 0,
            }),
            loading: AtomicBool::new(false),
        }
    }

    /// Loads (or reloads) the catalog from `source`.
    ///
    /// Runs the provider and normalization off the async runtime, then
    /// publishes the result atomically. Designed to be spawned as a
    /// background task; the loading flag clears even if the task is
    /// cancelled at an await point. Returns the number of products
    /// published (zero on provider failure).
    pub async fn load<S>(&self, source: S, source_prefix: &str) -> usize
    where
        S: CatalogSource + Send + 'static,
    {
        let _guard = LoadingGuard::arm(&self.loading);
        let prefix = source_prefix.to_owned();

        let parsed = tokio::task::spawn_blocking(move || {
            source.sources().map(|files| parse_catalog(files, &prefix))
        })
        .await;

        let products = match parsed {
            Ok(Ok(products)) => products,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "catalog load failed; publishing empty catalog");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog load task failed; publishing empty catalog");
                Vec::new()
            }
        };

        self.publish(products)
    }

    /// Publishes a fully parsed product list, recomputing the observed max
    /// price and rebasing the filter range per the first-load/reload rules.
    fn publish(&self, products: Vec<Product>) -> usize {
        let count = products.len();
        let max_price = products.iter().map(|p| p.price).fold(0.0_f64, f64::max);

        let mut inner = self.write();
        let first_load = inner.completed_loads == 0;
        inner.products = Arc::new(products);
        inner.filters.rebase_max_observed(max_price, first_load);
        inner.loaded_at = Some(Utc::now());
        inner.completed_loads += 1;
        drop(inner);

        tracing::info!(count, max_price, "catalog published");
        count
    }

    /// The current product list. Cheap to clone; the underlying list is
    /// shared and immutable until the next load replaces it wholesale.
    #[must_use]
    pub fn products(&self) -> Arc<Vec<Product>> {
        Arc::clone(&self.read().products)
    }

    /// A read-only snapshot of the current filter state.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.read().filters.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.read().loaded_at
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        self.write().filters.set_search_query(query);
    }

    pub fn toggle_category(&self, category: &str) {
        self.write().filters.toggle_category(category);
    }

    pub fn select_only_category(&self, category: Option<&str>) {
        self.write().filters.select_only_category(category);
    }

    pub fn set_price_range(&self, min: f64, max: f64) {
        self.write().filters.set_price_range(min, max);
    }

    pub fn set_discounts_only(&self, enabled: bool) {
        self.write().filters.set_discounts_only(enabled);
    }

    pub fn clear_filters(&self) {
        self.write().filters.clear();
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps the loading flag true for exactly the lifetime of a load attempt,
/// including early exits and task cancellation.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn arm(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use crate::types::{RawRow, SourceFile};

    struct InMemorySource {
        files: Vec<SourceFile>,
    }

    impl CatalogSource for InMemorySource {
        fn sources(&self) -> Result<Vec<SourceFile>, IngestError> {
            Ok(self.files.clone())
        }
    }

    struct UnreachableSource;

    impl CatalogSource for UnreachableSource {
        fn sources(&self) -> Result<Vec<SourceFile>, IngestError> {
            Err(IngestError::DataDir {
                path: "/nowhere".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            })
        }
    }

    fn row(title: &str, price: &str) -> RawRow {
        RawRow::from_pairs([("goods-title-link--jump", title), ("price", price)])
    }

    fn source_with_prices(prices: &[&str]) -> InMemorySource {
        InMemorySource {
            files: vec![SourceFile {
                name: "us-shein-kids-wear.csv".to_string(),
                rows: prices
                    .iter()
                    .enumerate()
                    .map(|(i, price)| row(&format!("Item {i}"), price))
                    .collect(),
            }],
        }
    }

    #[tokio::test]
    async fn load_publishes_products_and_clears_loading_flag() {
        let store = CatalogStore::new();
        assert!(store.products().is_empty());

        let count = store
            .load(source_with_prices(&["$10.00", "$30.00"]), "us-shein-")
            .await;
        assert_eq!(count, 2);
        assert_eq!(store.products().len(), 2);
        assert!(!store.is_loading());
        assert!(store.loaded_at().is_some());
        assert_eq!(store.products()[0].category, "Kids-Wear");
    }

    #[tokio::test]
    async fn first_load_sets_full_price_range() {
        let store = CatalogStore::new();
        store
            .load(source_with_prices(&["$10.00", "$30.00"]), "us-shein-")
            .await;
        let filters = store.filters();
        assert_eq!(filters.max_observed_price, 30.0);
        assert_eq!(filters.price_range.min, 0.0);
        assert_eq!(filters.price_range.max, 30.0);
        assert!(filters.is_default());
    }

    #[tokio::test]
    async fn reload_preserves_narrower_bound() {
        let store = CatalogStore::new();
        store
            .load(source_with_prices(&["$10.00", "$100.00"]), "us-shein-")
            .await;
        store.set_price_range(0.0, 60.0);

        // Smaller dataset: the explicit bound must not widen.
        store.load(source_with_prices(&["$10.00"]), "us-shein-").await;
        let filters = store.filters();
        assert_eq!(filters.price_range.max, 60.0);
        assert_eq!(filters.max_observed_price, 10.0);
    }

    #[tokio::test]
    async fn reload_rebases_unconstrained_bound() {
        let store = CatalogStore::new();
        store
            .load(source_with_prices(&["$10.00", "$100.00"]), "us-shein-")
            .await;

        // Bound left at the max: tracks the dataset upward.
        store
            .load(source_with_prices(&["$10.00", "$250.00"]), "us-shein-")
            .await;
        let filters = store.filters();
        assert_eq!(filters.price_range.max, 250.0);
        assert!(!filters.price_range_active());
    }

    #[tokio::test]
    async fn unreachable_provider_publishes_empty_catalog() {
        let store = CatalogStore::new();
        let count = store.load(UnreachableSource, "us-shein-").await;
        assert_eq!(count, 0);
        assert!(store.products().is_empty());
        assert!(!store.is_loading());
        // Still a completed load: the empty state is terminal, not an error.
        assert!(store.loaded_at().is_some());
    }

    #[tokio::test]
    async fn filter_mutations_pass_through() {
        let store = CatalogStore::new();
        store
            .load(source_with_prices(&["$10.00", "$30.00"]), "us-shein-")
            .await;

        store.set_search_query("dress");
        store.toggle_category("Kids-Wear");
        store.set_discounts_only(true);
        store.set_price_range(5.0, 20.0);

        let filters = store.filters();
        assert_eq!(filters.search_query, "dress");
        assert!(filters.selected_categories.contains("Kids-Wear"));
        assert!(filters.discounts_only);
        assert_eq!(filters.price_range.min, 5.0);

        store.clear_filters();
        assert!(store.filters().is_default());
    }
}
