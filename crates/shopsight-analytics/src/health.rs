//! Composite category health scoring.
//!
//! Each category is scored 0–100 from four equally weighted components
//! measured against cross-category reference values. The formula rewards
//! volume, closeness to the median price point (not cheapness), a healthy
//! discount band, and color variety.

use shopsight_core::{CategoryHealth, CategoryStat};

/// Scores every category against the full set of `stats`, returning the
/// results sorted descending by score (stable, so ties keep the input
/// order).
///
/// Components, each 0–25:
/// - volume: product count relative to the largest category;
/// - price stability: deviation of `avg_price` from the cross-category
///   median (a deviation of 100% or more scores 0);
/// - discount band: stepped — full points for an average discount in
///   `[10, 30]`, partial for `[5, 10)` or `(30, 40]`, none otherwise;
/// - color variety: `avg_colors` relative to the best category.
///
/// The total is truncated toward zero, never rounded.
#[must_use]
pub fn score(stats: &[CategoryStat]) -> Vec<CategoryHealth> {
    if stats.is_empty() {
        return Vec::new();
    }

    let max_product_count = stats.iter().map(|s| s.product_count).max().unwrap_or(0);
    let median_price = median(stats.iter().map(|s| s.avg_price).collect());
    let max_colors = stats.iter().map(|s| s.avg_colors).fold(0.0_f64, f64::max);

    let mut scored: Vec<CategoryHealth> = stats
        .iter()
        .map(|s| {
            #[allow(clippy::cast_precision_loss)]
            let volume_score = ratio(s.product_count as f64, max_product_count as f64) * 25.0;

            let price_dev = if median_price > 0.0 {
                (s.avg_price - median_price).abs() / median_price
            } else {
                0.0
            };
            let price_score = (1.0 - price_dev).max(0.0) * 25.0;

            let discount_score = discount_band_score(s.avg_discount);
            let color_score = ratio(s.avg_colors, max_colors) * 25.0;

            let total = volume_score + price_score + discount_score + color_score;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let health_score = total as u8;
            CategoryHealth {
                name: s.name.clone(),
                product_count: s.product_count,
                avg_price: s.avg_price,
                avg_discount: s.avg_discount,
                avg_colors: s.avg_colors,
                health_score,
            }
        })
        .collect();

    // Vec::sort_by is stable: equal scores keep the aggregate's
    // alphabetical order.
    scored.sort_by(|a, b| b.health_score.cmp(&a.health_score));
    scored
}

/// `value / max` capped at 1, or 0 when there is no positive reference.
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max).min(1.0)
    } else {
        0.0
    }
}

/// The stepped discount component. Note the asymmetric half-open edges:
/// `[5, 10)` on the low side, `(30, 40]` on the high side.
fn discount_band_score(avg_discount: f64) -> f64 {
    if (10.0..=30.0).contains(&avg_discount) {
        25.0
    } else if (5.0..10.0).contains(&avg_discount)
        || (avg_discount > 30.0 && avg_discount <= 40.0)
    {
        15.0
    } else {
        0.0
    }
}

/// Median with the usual mean-of-middle-two rule for even counts.
fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
