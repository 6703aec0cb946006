//! Rankings, sorting, and paging over the filtered catalog.

use std::collections::BTreeMap;

use shopsight_core::Product;

/// Sort orders offered by the product explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order, untouched.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    DiscountDesc,
    NameAsc,
    ColorsDesc,
}

/// Returns `products` sorted by `key`. All sorts are stable, so equal keys
/// keep the filtered order.
#[must_use]
pub fn sort_products(products: &[Product], key: SortKey) -> Vec<Product> {
    let mut sorted = products.to_vec();
    match key {
        SortKey::Default => {}
        SortKey::PriceAsc => sorted.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => sorted.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::DiscountDesc => {
            sorted.sort_by(|a, b| b.discount_value.total_cmp(&a.discount_value));
        }
        SortKey::NameAsc => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::ColorsDesc => sorted.sort_by(|a, b| b.color_count.cmp(&a.color_count)),
    }
    sorted
}

/// The `n` most expensive products, price-descending.
#[must_use]
pub fn top_expensive(products: &[Product], n: usize) -> Vec<Product> {
    let mut sorted = sort_products(products, SortKey::PriceDesc);
    sorted.truncate(n);
    sorted
}

/// The `n` most expensive products within one category.
#[must_use]
pub fn category_top_products(products: &[Product], category: &str, n: usize) -> Vec<Product> {
    let in_category: Vec<Product> = products
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect();
    top_expensive(&in_category, n)
}

/// Sorted distinct category names across the full list.
#[must_use]
pub fn all_categories(products: &[Product]) -> Vec<String> {
    let mut names: Vec<String> = products.iter().map(|p| p.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

/// Product count per category, keyed by name.
#[must_use]
pub fn category_counts(products: &[Product]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for product in products {
        *counts.entry(product.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Up to `n` other products from the same category, in catalog order — the
/// offline "similar items" list shown next to a selected product.
#[must_use]
pub fn similar_products(products: &[Product], product: &Product, n: usize) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.title != product.title)
        .take(n)
        .cloned()
        .collect()
}

/// One page of `items`, 1-based. An out-of-range page is empty.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    if page == 0 || per_page == 0 {
        return Vec::new();
    }
    items
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

/// Number of pages needed for `len` items (ceiling division).
#[must_use]
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}
