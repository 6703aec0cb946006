use serde::{Deserialize, Serialize};

/// A catalog product normalized from one raw CSV row, canonical for every
/// downstream derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Category label derived from the source file name, e.g. `"Kids-Wear"`.
    pub category: String,
    pub title: String,
    /// Original price text exactly as exported, e.g. `"$12.00-$18.00"`.
    /// Kept for display and debugging; never used in arithmetic.
    pub price_raw: String,
    /// Parsed price in currency units, rounded to 2 decimal places.
    /// `0.0` when the raw text could not be parsed.
    pub price: f64,
    /// Original discount text, e.g. `"-20%"`. `None` when the column was absent.
    pub discount_raw: Option<String>,
    /// Discount magnitude in percent with the sign stripped (`"-20%"` → `20.0`).
    /// `0.0` when absent or unparseable.
    pub discount_value: f64,
    /// Number of color variants; `0` when the cell was absent or non-numeric.
    pub color_count: u32,
    pub selling_proposition: Option<String>,
}

impl Product {
    /// Returns `true` if the product carries a positive discount.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_value > 0.0
    }

    /// Returns `true` if at least one color variant was recorded.
    #[must_use]
    pub fn has_color_variants(&self) -> bool {
        self.color_count > 0
    }
}

/// Per-category statistics computed over the currently filtered catalog.
///
/// Averages use a positive-only denominator: a product contributes to an
/// average only when its value for that metric is `> 0`, so "not applicable"
/// rows never drag a mean toward zero. `product_count` has no such exclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub name: String,
    pub product_count: usize,
    /// Mean price over products priced above zero, rounded to 2 decimals.
    pub avg_price: f64,
    /// Mean discount over discounted products, rounded to 2 decimals.
    pub avg_discount: f64,
    /// Mean color count over products with variants, rounded to 1 decimal.
    pub avg_colors: f64,
}

/// A [`CategoryStat`] extended with its composite health score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryHealth {
    pub name: String,
    pub product_count: usize,
    pub avg_price: f64,
    pub avg_discount: f64,
    pub avg_colors: f64,
    /// Composite 0–100 score across volume, price stability, discount
    /// banding, and color variety. Truncated, never rounded.
    pub health_score: u8,
}

impl CategoryHealth {
    /// The display band this score falls into.
    #[must_use]
    pub fn band(&self) -> HealthBand {
        match self.health_score {
            0..=49 => HealthBand::Weak,
            50..=79 => HealthBand::Stable,
            _ => HealthBand::Strong,
        }
    }
}

/// Coarse health banding used by the category overview badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    /// Score below 50.
    Weak,
    /// Score in 50–79.
    Stable,
    /// Score of 80 or above.
    Strong,
}

impl std::fmt::Display for HealthBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthBand::Weak => write!(f, "weak"),
            HealthBand::Stable => write!(f, "stable"),
            HealthBand::Strong => write!(f, "strong"),
        }
    }
}

/// Dashboard-wide scalar metrics over the currently filtered catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_products: usize,
    /// Mean price over products priced above zero, rounded to 2 decimals.
    pub average_price: f64,
    /// Number of distinct categories present in the filtered set.
    pub total_categories: usize,
    /// Mean discount over discounted products, rounded to 2 decimals.
    pub average_discount: f64,
    pub discounted_products: usize,
    /// Mean color count over products with variants, rounded to 1 decimal.
    pub avg_colors: f64,
}

impl KpiSummary {
    /// The all-zero summary produced by an empty filtered set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_products: 0,
            average_price: 0.0,
            total_categories: 0,
            average_discount: 0.0,
            discounted_products: 0,
            avg_colors: 0.0,
        }
    }
}
