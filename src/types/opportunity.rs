//! Canonical opportunity entity — the display model produced by the normalizer.
//!
//! Immutable once constructed. The sync controller hands out shared slices
//! (`Arc<[Opportunity]>`) and never edits an entry in place.

use serde::Serialize;

/// Placeholder shown when the source record carries no usable number.
pub const UNAVAILABLE: &str = "-";

/// Trade direction between the two venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Buy YES on Kalshi, hedge on Polymarket (`kalshi_to_poly`).
    KalshiToPoly,
    /// Buy YES on Polymarket, hedge on Kalshi (`poly_to_kalshi`).
    PolyToKalshi,
}

impl Direction {
    /// Parse the backend's `direction` value. Unknown values yield `None`.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "kalshi_to_poly" => Some(Direction::KalshiToPoly),
            "poly_to_kalshi" => Some(Direction::PolyToKalshi),
            _ => None,
        }
    }

    /// Derive direction from the backend's leg description
    /// (e.g. `YES_Kalshi_KC + NO_Poly_KC`).
    pub fn from_leg_type(s: &str) -> Option<Self> {
        if s.starts_with("YES_Kalshi") {
            Some(Direction::KalshiToPoly)
        } else if s.starts_with("YES_Poly") {
            Some(Direction::PolyToKalshi)
        } else {
            None
        }
    }

    pub fn as_wire(&self) -> &'static str {
        match self {
            Direction::KalshiToPoly => "kalshi_to_poly",
            Direction::PolyToKalshi => "poly_to_kalshi",
        }
    }

    /// Human-readable market label.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::KalshiToPoly => "Kalshi → Poly",
            Direction::PolyToKalshi => "Poly → Kalshi",
        }
    }
}

/// One normalized, displayable arbitrage record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    /// Position within the fetched batch.
    pub id: String,
    pub direction: Direction,
    /// Direction label, e.g. "Kalshi → Poly".
    pub market: String,
    /// "<kalshi_ticker> / <polymarket_slug>".
    pub ticker: String,
    /// Finite profit per contract, `None` when the source omits it.
    pub profit_value: Option<f64>,
    /// "$0.0123" or [`UNAVAILABLE`].
    pub price: String,
    /// "1.23%" or [`UNAVAILABLE`].
    pub profit: String,
    /// Venue link for the YES leg. Best effort, may not resolve.
    pub action_url: Option<String>,
    pub kalshi_url: Option<String>,
    pub polymarket_url: Option<String>,
    pub league: Option<String>,
    /// Unmodified source record.
    pub raw: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_wire_values() {
        assert_eq!(Direction::from_wire("kalshi_to_poly"), Some(Direction::KalshiToPoly));
        assert_eq!(Direction::from_wire("poly_to_kalshi"), Some(Direction::PolyToKalshi));
        assert_eq!(Direction::from_wire("sideways"), None);
        assert_eq!(Direction::KalshiToPoly.as_wire(), "kalshi_to_poly");
    }

    #[test]
    fn test_direction_from_leg_type() {
        assert_eq!(
            Direction::from_leg_type("YES_Kalshi_KC + NO_Poly_KC"),
            Some(Direction::KalshiToPoly)
        );
        assert_eq!(
            Direction::from_leg_type("YES_Poly_BUF + NO_Kalshi_BUF"),
            Some(Direction::PolyToKalshi)
        );
        assert_eq!(Direction::from_leg_type("NO_Kalshi"), None);
    }

    #[test]
    fn test_opportunity_serializes_direction_as_wire_value() {
        let o = Opportunity {
            id: "0".to_string(),
            direction: Direction::KalshiToPoly,
            market: Direction::KalshiToPoly.label().to_string(),
            ticker: "A / b".to_string(),
            profit_value: None,
            price: UNAVAILABLE.to_string(),
            profit: UNAVAILABLE.to_string(),
            action_url: None,
            kalshi_url: None,
            polymarket_url: None,
            league: None,
            raw: serde_json::json!({}),
        };
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["direction"], "kalshi_to_poly");
        assert_eq!(v["price"], "-");
        assert!(o.profit_value.is_none());
    }

    #[test]
    fn test_direction_labels() {
        assert_eq!(Direction::KalshiToPoly.label(), "Kalshi → Poly");
        assert_eq!(Direction::PolyToKalshi.label(), "Poly → Kalshi");
    }
}
