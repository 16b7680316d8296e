/// Price-cell cleaning, comparison rounding, and money display formatting.
///
/// # Rounding policy
///
/// Comparison prices are computed by scaling the unit price by `10^precision`
/// and applying [`f64::round`], which rounds half away from zero. The result
/// is kept as an `i64` in "minor units" so that tie detection is exact
/// integer equality, never a within-epsilon float comparison. At precision 2,
/// `5.0049` and `5.00` both scale to `500` and therefore tie.
use crate::newtypes::Precision;

/// Cleans a raw price cell into a parsed unit price.
///
/// All characters except digits, `.`, `-`, and `,` are stripped, then `,` is
/// removed entirely (treated as a thousands separator, never a decimal
/// comma). Whatever remains is parsed as an `f64`. Unparseable or empty
/// input yields `None`: an absent price excludes the row from ranking but is
/// not an ingestion error.
pub fn clean_price(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    if kept.is_empty() {
        return None;
    }
    let value = kept.parse::<f64>().ok()?;
    if value.is_finite() { Some(value) } else { None }
}

/// Returns the comparison price in minor units at the given precision.
///
/// `comparison_minor(5.0049, 2)` is `500` and `comparison_minor(5.005, 2)`
/// is `501`. Values whose nearest double sits just below the halfway point
/// (e.g. `2.675` at precision 2) round down; the policy applies to the
/// scaled double, not the decimal literal.
pub fn comparison_minor(unit_price: f64, precision: Precision) -> i64 {
    (unit_price * precision.scale()).round() as i64
}

/// Formats a money value with four decimals, e.g. `$12,345.6700`.
///
/// Four decimals match the resolution at which supplier quotes are shown
/// when resolving ties.
pub fn fmt_money4(value: f64) -> String {
    format_grouped(value, 4)
}

/// Formats a money value with two decimals, e.g. `$1,234.50`.
///
/// Two decimals are used for subtotal and grand-total display.
pub fn fmt_money2(value: f64) -> String {
    format_grouped(value, 2)
}

fn format_grouped(value: f64, decimals: usize) -> String {
    let negative = value < 0.0;
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac_part}")
    }
}
