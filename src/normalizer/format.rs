//! Numeric → display string conversion. The only place numbers become text.

use crate::types::opportunity::UNAVAILABLE;

/// `$` + amount with 4 fractional digits, or the sentinel.
pub fn format_price(profit: Option<f64>) -> String {
    match profit {
        Some(p) => format!("${:.4}", unsigned_zero(p)),
        None => UNAVAILABLE.to_string(),
    }
}

/// `profit * 100` with 2 fractional digits and a `%` suffix, or the sentinel.
pub fn format_percent(profit: Option<f64>) -> String {
    match profit {
        Some(p) => format!("{:.2}%", unsigned_zero(p * 100.0)),
        None => UNAVAILABLE.to_string(),
    }
}

/// `-0.0` prints as "-0.0000"; the dashboard shows plain zero.
fn unsigned_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
