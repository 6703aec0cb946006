//! Normalization from raw CSV rows to [`shopsight_core::Product`].
//!
//! Cell parsing is delegated to [`crate::parse`]; this module owns the
//! column resolution, drop rules, and category label derivation.

use shopsight_core::Product;

use crate::parse::{parse_color_count, parse_discount, parse_price, round2};
use crate::types::{RawRow, SourceFile};

/// Primary title column in the export schema.
const TITLE_COLUMN: &str = "goods-title-link--jump";
/// Older exports carry the title under this name instead.
const TITLE_FALLBACK_COLUMN: &str = "goods-title-link";
const PRICE_COLUMN: &str = "price";
const DISCOUNT_COLUMN: &str = "discount";
const COLOR_COUNT_COLUMN: &str = "color-count";
const SELLING_PROPOSITION_COLUMN: &str = "selling_proposition";

/// Normalizes one raw row into a [`Product`] under the given category label.
///
/// Returns `None` — silently dropping the row — when the title (under either
/// recognized column) or the price cell is missing. Malformed numeric fields
/// never drop a row: they default to zero with a logged diagnostic.
#[must_use]
pub fn normalize_row(row: &RawRow, category: &str) -> Option<Product> {
    let title = row.get(TITLE_COLUMN).or_else(|| row.get(TITLE_FALLBACK_COLUMN))?;
    let price_raw = row.get(PRICE_COLUMN)?;

    let price = match parse_price(price_raw) {
        Some(value) => round2(value),
        None => {
            tracing::warn!(category, price = price_raw, "unparseable price, defaulting to 0");
            0.0
        }
    };

    let discount_raw = row.get(DISCOUNT_COLUMN);
    let discount_value = match discount_raw {
        Some(raw) => parse_discount(raw).unwrap_or_else(|| {
            tracing::warn!(category, discount = raw, "unparseable discount, defaulting to 0");
            0.0
        }),
        None => 0.0,
    };

    let color_count = row.get(COLOR_COUNT_COLUMN).map_or(0, parse_color_count);

    Some(Product {
        category: category.to_owned(),
        title: title.to_owned(),
        price_raw: price_raw.to_owned(),
        price,
        discount_raw: discount_raw.map(str::to_owned),
        discount_value,
        color_count,
        selling_proposition: row.get(SELLING_PROPOSITION_COLUMN).map(str::to_owned),
    })
}

/// Derives a category label from a source file name.
///
/// `"us-shein-kids-wear.csv"` with prefix `"us-shein-"` becomes
/// `"Kids-Wear"`: the prefix and `.csv` suffix are stripped, underscores
/// become spaces, and the remainder is title-cased. Hyphens are kept, so
/// each hyphen-separated word is capitalized individually.
#[must_use]
pub fn category_from_source(source_name: &str, prefix: &str) -> String {
    let stem = source_name.strip_prefix(prefix).unwrap_or(source_name);
    let stem = stem.strip_suffix(".csv").unwrap_or(stem);
    title_case(&stem.replace('_', " "))
}

/// Capitalizes the first letter of every alphabetic run and lowercases the
/// rest, so `"kids-wear"` → `"Kids-Wear"` and `"HOME textile"` → `"Home
/// Textile"`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alphabetic = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}

/// Normalizes every row of every source file into a flat product list.
///
/// The per-file category label is derived once from the file name; rows that
/// fail the drop rules are excluded silently.
#[must_use]
pub fn parse_catalog(sources: Vec<SourceFile>, prefix: &str) -> Vec<Product> {
    let mut products = Vec::new();
    for file in sources {
        let category = category_from_source(&file.name, prefix);
        let before = products.len();
        products.extend(
            file.rows
                .iter()
                .filter_map(|row| normalize_row(row, &category)),
        );
        tracing::info!(
            source = %file.name,
            category = %category,
            kept = products.len() - before,
            total = file.rows.len(),
            "normalized source file"
        );
    }
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(title: &str, price: &str) -> RawRow {
        RawRow::from_pairs([
            (TITLE_COLUMN, title),
            (PRICE_COLUMN, price),
            (DISCOUNT_COLUMN, "-20%"),
            (COLOR_COUNT_COLUMN, "3"),
            (SELLING_PROPOSITION_COLUMN, "Hot Sale"),
        ])
    }

    #[test]
    fn normalize_row_parses_all_fields() {
        let row = make_row("Toddler Girls Floral Dress", "$9.99");
        let product = normalize_row(&row, "Kids-Wear").unwrap();
        assert_eq!(product.category, "Kids-Wear");
        assert_eq!(product.title, "Toddler Girls Floral Dress");
        assert_eq!(product.price_raw, "$9.99");
        assert_eq!(product.price, 9.99);
        assert_eq!(product.discount_raw.as_deref(), Some("-20%"));
        assert_eq!(product.discount_value, 20.0);
        assert_eq!(product.color_count, 3);
        assert_eq!(product.selling_proposition.as_deref(), Some("Hot Sale"));
    }

    #[test]
    fn normalize_row_range_price_takes_mean() {
        let row = make_row("Curtain Set", "$12.00-$18.00");
        let product = normalize_row(&row, "Curtains").unwrap();
        assert_eq!(product.price, 15.0);
        assert_eq!(product.price_raw, "$12.00-$18.00");
    }

    #[test]
    fn normalize_row_bad_price_defaults_to_zero() {
        let row = make_row("Mystery Item", "N/A");
        let product = normalize_row(&row, "Misc").unwrap();
        assert_eq!(product.price, 0.0);
        assert_eq!(product.price_raw, "N/A");
    }

    #[test]
    fn normalize_row_falls_back_to_secondary_title() {
        let row = RawRow::from_pairs([
            (TITLE_FALLBACK_COLUMN, "Plain Tee"),
            (PRICE_COLUMN, "$4.50"),
        ]);
        let product = normalize_row(&row, "T-Shirts").unwrap();
        assert_eq!(product.title, "Plain Tee");
    }

    #[test]
    fn normalize_row_prefers_primary_title() {
        let row = RawRow::from_pairs([
            (TITLE_COLUMN, "Primary"),
            (TITLE_FALLBACK_COLUMN, "Secondary"),
            (PRICE_COLUMN, "$4.50"),
        ]);
        let product = normalize_row(&row, "T-Shirts").unwrap();
        assert_eq!(product.title, "Primary");
    }

    #[test]
    fn normalize_row_drops_row_without_title() {
        let row = RawRow::from_pairs([(PRICE_COLUMN, "$4.50")]);
        assert!(normalize_row(&row, "T-Shirts").is_none());
        let row = RawRow::from_pairs([(TITLE_COLUMN, "  "), (PRICE_COLUMN, "$4.50")]);
        assert!(normalize_row(&row, "T-Shirts").is_none());
    }

    #[test]
    fn normalize_row_drops_row_without_price() {
        let row = RawRow::from_pairs([(TITLE_COLUMN, "Plain Tee")]);
        assert!(normalize_row(&row, "T-Shirts").is_none());
    }

    #[test]
    fn normalize_row_missing_optional_columns_default() {
        let row = RawRow::from_pairs([(TITLE_COLUMN, "Plain Tee"), (PRICE_COLUMN, "$4.50")]);
        let product = normalize_row(&row, "T-Shirts").unwrap();
        assert!(product.discount_raw.is_none());
        assert_eq!(product.discount_value, 0.0);
        assert_eq!(product.color_count, 0);
        assert!(product.selling_proposition.is_none());
    }

    #[test]
    fn category_from_source_strips_prefix_and_suffix() {
        assert_eq!(
            category_from_source("us-shein-kids-wear.csv", "us-shein-"),
            "Kids-Wear"
        );
    }

    #[test]
    fn category_from_source_replaces_underscores() {
        assert_eq!(
            category_from_source("us-shein-home_textile.csv", "us-shein-"),
            "Home Textile"
        );
    }

    #[test]
    fn category_from_source_unprefixed_name_survives() {
        assert_eq!(category_from_source("appliances.csv", "us-shein-"), "Appliances");
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("kids-wear"), "Kids-Wear");
        assert_eq!(title_case("HOME textile"), "Home Textile");
        assert_eq!(title_case("women's shoes"), "Women'S Shoes");
    }

    #[test]
    fn parse_catalog_flattens_and_labels() {
        let sources = vec![
            SourceFile {
                name: "us-shein-kids-wear.csv".to_string(),
                rows: vec![make_row("Dress A", "$5.00"), make_row("Dress B", "$7.00")],
            },
            SourceFile {
                name: "us-shein-curtains.csv".to_string(),
                rows: vec![
                    make_row("Curtain", "$20.00"),
                    // Dropped: no title under either column.
                    RawRow::from_pairs([(PRICE_COLUMN, "$1.00")]),
                ],
            },
        ];
        let products = parse_catalog(sources, "us-shein-");
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].category, "Kids-Wear");
        assert_eq!(products[2].category, "Curtains");
    }
}
