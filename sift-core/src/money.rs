//! Monetary amount tokens as printed on statements

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a statement amount token into a signed decimal.
///
/// Accepts thousands separators, a `$` prefix, a leading `-` (before or after
/// the `$`) and accounting parentheses. The token must carry exactly two
/// fractional digits; anything else is rejected.
///
///   "1,000.00"   ->  1000.00
///   "-$14.05"    -> -14.05
///   "(26.00)"    -> -26.00
pub fn parse_amount(token: &str) -> Option<Decimal> {
    let mut s = token.trim();
    let mut negative = false;

    if let Some(inner) = s.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        negative = true;
        s = inner.trim();
    }
    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest.trim_start();
    }
    if let Some(rest) = s.strip_prefix('$') {
        s = rest.trim_start();
    }
    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest;
    }

    let digits: String = s.chars().filter(|c| *c != ',').collect();
    let (int_part, frac_part) = digits.split_once('.')?;
    if int_part.is_empty()
        || !int_part.chars().all(|c| c.is_ascii_digit())
        || frac_part.len() != 2
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let value = Decimal::from_str(&digits).ok()?;
    Some(if negative { -value } else { value })
}

/// Render an amount the way summaries print it: `$1000.00`, `$-45.67`
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
