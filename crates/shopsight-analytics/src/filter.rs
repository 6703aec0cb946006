//! The filter engine: intersection of four independent predicates.

use shopsight_core::{FilterState, Product};

/// Applies the active filter set to `products`, returning a new list.
///
/// Each of the four predicates — discount flag, category membership, price
/// range, title search — is a no-op when its dimension is at the default.
/// The predicates are a pure intersection, so their order cannot change the
/// result; cheaper checks run first. The input is never mutated.
#[must_use]
pub fn apply(products: &[Product], filters: &FilterState) -> Vec<Product> {
    let mut filtered: Vec<Product> = products.to_vec();

    if filters.discounts_only {
        filtered.retain(Product::is_discounted);
    }
    if !filters.selected_categories.is_empty() {
        filtered.retain(|p| filters.selected_categories.contains(&p.category));
    }
    if filters.price_range_active() {
        filtered.retain(|p| filters.price_range.contains(p.price));
    }
    if !filters.search_query.is_empty() {
        let needle = filters.search_query.to_lowercase();
        filtered.retain(|p| p.title.to_lowercase().contains(&needle));
    }

    filtered
}
