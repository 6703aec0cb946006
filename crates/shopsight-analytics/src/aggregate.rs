//! Grouped per-category statistics.

use std::collections::BTreeMap;

use shopsight_core::{CategoryStat, Product};

use crate::util::{round1, round2};

#[derive(Default)]
struct Accumulator {
    product_count: usize,
    price_sum: f64,
    price_count: usize,
    discount_sum: f64,
    discount_count: usize,
    color_sum: u64,
    color_count: usize,
}

/// Groups `products` by category and computes per-group statistics.
///
/// `product_count` counts every product. The averages use positive-only
/// denominators: a zero price means "unparseable", a zero discount means
/// "not discounted", a zero color count means "no variant data" — none of
/// which should drag a mean down. Output is sorted alphabetically by
/// category name, the order the dashboard renders; the health scorer
/// re-sorts by score, so the base order also fixes its tie-breaking.
#[must_use]
pub fn aggregate(products: &[Product]) -> Vec<CategoryStat> {
    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

    for product in products {
        let acc = groups.entry(product.category.as_str()).or_default();
        acc.product_count += 1;
        if product.price > 0.0 {
            acc.price_sum += product.price;
            acc.price_count += 1;
        }
        if product.discount_value > 0.0 {
            acc.discount_sum += product.discount_value;
            acc.discount_count += 1;
        }
        if product.color_count > 0 {
            acc.color_sum += u64::from(product.color_count);
            acc.color_count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(name, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let avg_price = if acc.price_count > 0 {
                round2(acc.price_sum / acc.price_count as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_precision_loss)]
            let avg_discount = if acc.discount_count > 0 {
                round2(acc.discount_sum / acc.discount_count as f64)
            } else {
                0.0
            };
            #[allow(clippy::cast_precision_loss)]
            let avg_colors = if acc.color_count > 0 {
                round1(acc.color_sum as f64 / acc.color_count as f64)
            } else {
                0.0
            };
            CategoryStat {
                name: name.to_owned(),
                product_count: acc.product_count,
                avg_price,
                avg_discount,
                avg_colors,
            }
        })
        .collect()
}
