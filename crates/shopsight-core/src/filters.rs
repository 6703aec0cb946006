use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Inclusive price bounds applied by the filter engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Builds a range with the bounds swapped if given out of order, so the
    /// `min <= max` invariant holds by construction.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Returns `true` if `price` falls within the bounds (inclusive).
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Which view is asking for the active-filter count.
///
/// The dashboard counts the category filter as a single dimension; the
/// product explorer counts each selected category individually. Both
/// behaviors are intentional per-view semantics carried over from the
/// original product — kept separate rather than unified pending product
/// confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterView {
    Dashboard,
    Explorer,
}

/// The set of active constraints narrowing the catalog to a working view.
///
/// One instance per viewing session. Mutated in place by discrete setters;
/// every derived value downstream is recomputed from `(catalog, filters)`
/// after each mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Case-insensitive substring match against product titles.
    pub search_query: String,
    /// Empty set means no category restriction.
    pub selected_categories: BTreeSet<String>,
    pub price_range: PriceRange,
    pub discounts_only: bool,
    /// Highest price observed in the current catalog. Maintained by the
    /// catalog store on every (re)load; a `price_range.max` equal to this
    /// value means "no upper constraint".
    pub max_observed_price: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_categories: BTreeSet::new(),
            price_range: PriceRange::new(0.0, 0.0),
            discounts_only: false,
            max_observed_price: 0.0,
        }
    }
}

impl FilterState {
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Adds the category to the selection, or removes it if already selected.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_owned());
        }
    }

    /// Replaces the selection with a single category, or clears it entirely.
    /// This is the dashboard's single-select behavior.
    pub fn select_only_category(&mut self, category: Option<&str>) {
        self.selected_categories.clear();
        if let Some(name) = category {
            self.selected_categories.insert(name.to_owned());
        }
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) {
        self.price_range = PriceRange::new(min, max);
    }

    pub fn set_discounts_only(&mut self, enabled: bool) {
        self.discounts_only = enabled;
    }

    /// Resets every field to its default; the price range becomes the full
    /// `(0, max_observed_price)` span so no dimension reads as active.
    pub fn clear(&mut self) {
        self.search_query.clear();
        self.selected_categories.clear();
        self.price_range = PriceRange::new(0.0, self.max_observed_price);
        self.discounts_only = false;
    }

    /// Called by the catalog store when a load completes.
    ///
    /// On the first load the range is reset to the full span. On reloads the
    /// user's bounds are preserved, except an upper bound sitting exactly at
    /// the prior max (meaning "unconstrained") is rebased to the new max;
    /// the minimum is then clamped so `min <= max` still holds.
    pub fn rebase_max_observed(&mut self, new_max: f64, first_load: bool) {
        if first_load {
            self.price_range = PriceRange::new(0.0, new_max);
        } else {
            // The bound is a copy of the prior max, not a computation, so
            // exact comparison is the right test.
            #[allow(clippy::float_cmp)]
            let was_unconstrained = self.price_range.max == self.max_observed_price;
            if was_unconstrained {
                self.price_range.max = new_max;
                self.price_range.min = self.price_range.min.min(new_max);
            }
        }
        self.max_observed_price = new_max;
    }

    /// Returns `true` if the price range constrains anything beyond the
    /// full observed span.
    #[must_use]
    pub fn price_range_active(&self) -> bool {
        self.price_range.min > 0.0 || self.price_range.max < self.max_observed_price
    }

    /// Returns `true` when every filter dimension is at its default.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.active_filter_count(FilterView::Dashboard) == 0
    }

    /// Number of non-default filter dimensions, with per-view category
    /// counting (see [`FilterView`]).
    #[must_use]
    pub fn active_filter_count(&self, view: FilterView) -> usize {
        let mut count = 0;
        if !self.search_query.is_empty() {
            count += 1;
        }
        if !self.selected_categories.is_empty() {
            count += match view {
                FilterView::Dashboard => 1,
                FilterView::Explorer => self.selected_categories.len(),
            };
        }
        if self.price_range_active() {
            count += 1;
        }
        if self.discounts_only {
            count += 1;
        }
        count
    }
}
