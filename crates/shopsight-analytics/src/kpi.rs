//! Dashboard-wide scalar KPIs.

use std::collections::HashSet;

use shopsight_core::{KpiSummary, Product};

use crate::util::{round1, round2};

/// Reduces the filtered product set to the dashboard KPI block.
///
/// Uses the same positive-only denominator rule as the aggregation engine:
/// zero-valued prices, discounts, and color counts mark the metric as "not
/// applicable" for that product and stay out of the averages.
#[must_use]
pub fn kpis(products: &[Product]) -> KpiSummary {
    if products.is_empty() {
        return KpiSummary::empty();
    }

    let priced: Vec<f64> = products
        .iter()
        .filter(|p| p.price > 0.0)
        .map(|p| p.price)
        .collect();
    let discounted: Vec<f64> = products
        .iter()
        .filter(|p| p.is_discounted())
        .map(|p| p.discount_value)
        .collect();
    let with_colors: Vec<u32> = products
        .iter()
        .filter(|p| p.has_color_variants())
        .map(|p| p.color_count)
        .collect();

    let categories: HashSet<&str> = products.iter().map(|p| p.category.as_str()).collect();

    #[allow(clippy::cast_precision_loss)]
    let average_price = if priced.is_empty() {
        0.0
    } else {
        round2(priced.iter().sum::<f64>() / priced.len() as f64)
    };
    #[allow(clippy::cast_precision_loss)]
    let average_discount = if discounted.is_empty() {
        0.0
    } else {
        round2(discounted.iter().sum::<f64>() / discounted.len() as f64)
    };
    #[allow(clippy::cast_precision_loss)]
    let avg_colors = if with_colors.is_empty() {
        0.0
    } else {
        round1(with_colors.iter().map(|&c| f64::from(c)).sum::<f64>() / with_colors.len() as f64)
    };

    KpiSummary {
        total_products: products.len(),
        average_price,
        total_categories: categories.len(),
        average_discount,
        discounted_products: discounted.len(),
        avg_colors,
    }
}
