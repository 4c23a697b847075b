//! Opportunity normalizer — raw backend records → canonical `Opportunity`.
//!
//! Pure and total: no I/O, no logging, no errors. Records are heterogeneous
//! JSON, so fields are read leniently; anything missing or mistyped degrades
//! to "absent" instead of failing the batch.

pub mod format;
pub mod links;

use serde_json::Value;

use crate::types::opportunity::{Direction, Opportunity, UNAVAILABLE};

use self::format::{format_percent, format_price};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Normalize a fetched batch.
///
/// One output per input, same order, no filtering or deduplication.
pub fn normalize(raw: &[Value]) -> Vec<Opportunity> {
    raw.iter()
        .enumerate()
        .map(|(idx, record)| normalize_record(idx, record))
        .collect()
}

/// Normalize a single record at batch position `idx`.
pub fn normalize_record(idx: usize, record: &Value) -> Opportunity {
    let kalshi_ticker = str_field(record, "kalshi_ticker");
    let polymarket_slug = str_field(record, "polymarket_slug");
    let league = str_field(record, "league");
    let profit_value = profit_field(record);
    let direction = resolve_direction(record);

    let kalshi_url = kalshi_ticker.map(|t| links::kalshi_url(t, league));
    let polymarket_url = polymarket_slug.map(links::polymarket_url);
    let action_url = match direction {
        Direction::KalshiToPoly => kalshi_url.clone(),
        Direction::PolyToKalshi => polymarket_url.clone(),
    };

    Opportunity {
        id: idx.to_string(),
        direction,
        market: direction.label().to_string(),
        ticker: format!(
            "{} / {}",
            kalshi_ticker.unwrap_or(UNAVAILABLE),
            polymarket_slug.unwrap_or(UNAVAILABLE)
        ),
        profit_value,
        price: format_price(profit_value),
        profit: format_percent(profit_value),
        action_url,
        kalshi_url,
        polymarket_url,
        league: league.map(str::to_string),
        raw: record.clone(),
    }
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

/// Explicit `direction` wins; otherwise infer from the backend leg `type`.
/// Records with neither fall back to Poly → Kalshi.
fn resolve_direction(record: &Value) -> Direction {
    str_field(record, "direction")
        .and_then(Direction::from_wire)
        .or_else(|| str_field(record, "type").and_then(Direction::from_leg_type))
        .unwrap_or(Direction::PolyToKalshi)
}

/// Non-empty string field, `None` for anything else.
fn str_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Finite numeric `profit`. Strings, booleans and null count as absent.
fn profit_field(record: &Value) -> Option<f64> {
    record
        .get("profit")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
}

// =============================================================================
// TESTS
// =============================================================================
