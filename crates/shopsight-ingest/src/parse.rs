//! Cell-level parsers for the heterogeneous price/discount/color columns.
//!
//! Every parser here is total over its input: failure means "no value", and
//! the normalizer decides what the field defaults to. Nothing in this module
//! logs or errors.

/// Parses a price cell into currency units.
///
/// Strips the currency symbol and thousands separators first. A cleaned
/// value containing a hyphen is treated as a range (`"12.00-18.00"`): both
/// halves are parsed and their arithmetic mean is returned.
///
/// Returns `None` when the cleaned text (or either range half) is not a
/// valid number.
pub(crate) fn parse_price(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if let Some((low, high)) = cleaned.split_once('-') {
        let low = low.trim().parse::<f64>().ok()?;
        let high = high.trim().parse::<f64>().ok()?;
        Some((low + high) / 2.0)
    } else {
        cleaned.parse::<f64>().ok()
    }
}

/// Parses a discount cell into a percentage magnitude.
///
/// The `%` and `-` characters are stripped wherever they appear, so
/// `"-20%"` parses as `20.0`. Returns `None` when the remainder is not a
/// valid number.
pub(crate) fn parse_discount(raw: &str) -> Option<f64> {
    raw.replace(['%', '-'], "").parse::<f64>().ok()
}

/// Parses a color-count cell. Accepts only a nonempty all-digit value;
/// anything else (including decimals) counts as zero variants.
pub(crate) fn parse_color_count(raw: &str) -> u32 {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Rounds to 2 decimal places (currency and percentages).
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to 1 decimal place (color-count averages).
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
