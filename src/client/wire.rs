//! Response body decoding for the arbitrage backend.
//!
//! Kept separate from the HTTP calls so body handling is testable without a server.

use serde::Deserialize;
use serde_json::Value;

use crate::client::error::{ApiError, Endpoint};

/// `GET /api/arbitrage` body.
#[derive(Debug, Deserialize)]
struct ListBody {
    #[serde(default)]
    arbitrage_opportunities: Option<Vec<Value>>,
}

/// `GET /api/refresh-arbitrage` body.
#[derive(Debug, Default, Deserialize)]
struct RecomputeBody {
    #[serde(default)]
    refreshed: Option<bool>,
    #[serde(default)]
    matched_pairs: Option<u64>,
    #[serde(default)]
    note: Option<String>,
}

/// Decoded recompute trigger response.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeReport {
    /// Whether the backend actually recomputed (stale data found).
    pub refreshed: bool,
    pub matched_pairs: Option<u64>,
    pub note: Option<String>,
}

/// Decode the opportunity list. A missing or null list is an empty batch.
pub fn decode_opportunity_list(body: &str) -> Result<Vec<Value>, ApiError> {
    let endpoint = Endpoint::ListOpportunities;
    let value = parse_object(endpoint, body)?;
    let parsed: ListBody =
        serde_json::from_value(value).map_err(|e| ApiError::malformed(endpoint, e))?;
    Ok(parsed.arbitrage_opportunities.unwrap_or_default())
}

/// Decode the recompute report. A missing `refreshed` flag means false.
pub fn decode_recompute_report(body: &str) -> Result<RecomputeReport, ApiError> {
    let endpoint = Endpoint::TriggerRecompute;
    let value = parse_object(endpoint, body)?;
    let parsed: RecomputeBody =
        serde_json::from_value(value).map_err(|e| ApiError::malformed(endpoint, e))?;
    Ok(RecomputeReport {
        refreshed: parsed.refreshed.unwrap_or(false),
        matched_pairs: parsed.matched_pairs,
        note: parsed.note,
    })
}

fn parse_object(endpoint: Endpoint, body: &str) -> Result<Value, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        ApiError::malformed(
            endpoint,
            format!("invalid JSON: {} (body: {})", e, truncate(body, 200)),
        )
    })?;
    if !value.is_object() {
        return Err(ApiError::malformed(endpoint, "expected a JSON object"));
    }
    Ok(value)
}

/// Truncate on a char boundary for log and error output.
pub(crate) fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list() {
        let body = r#"{
            "arbitrage_opportunities": [
                {"kalshi_ticker": "KXNFLGAME-KC", "polymarket_slug": "nfl-kc-buf", "profit": 0.031},
                {"kalshi_ticker": "KXNFLGAME-BUF", "polymarket_slug": "nfl-kc-buf"}
            ]
        }"#;

        let records = decode_opportunity_list(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["kalshi_ticker"], "KXNFLGAME-KC");
        assert!(records[1].get("profit").is_none());
    }

    #[test]
    fn test_decode_list_missing_or_null_is_empty() {
        assert!(decode_opportunity_list("{}").unwrap().is_empty());
        assert!(decode_opportunity_list(r#"{"arbitrage_opportunities": null}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_list_wrong_shape() {
        let err = decode_opportunity_list(r#"{"arbitrage_opportunities": "nope"}"#).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));

        let err = decode_opportunity_list("[1, 2]").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));

        let err = decode_opportunity_list("<html>502</html>").unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_decode_recompute_report() {
        let body = r#"{"refreshed": true, "matched_pairs": 14, "note": "Market data refreshed"}"#;
        let report = decode_recompute_report(body).unwrap();
        assert!(report.refreshed);
        assert_eq!(report.matched_pairs, Some(14));
        assert_eq!(report.note.as_deref(), Some("Market data refreshed"));
    }

    #[test]
    fn test_decode_recompute_missing_flag_is_false() {
        let report = decode_recompute_report("{}").unwrap();
        assert!(!report.refreshed);
        assert_eq!(report.matched_pairs, None);
    }

    #[test]
    fn test_decode_recompute_wrong_type() {
        let err = decode_recompute_report(r#"{"refreshed": "yes"}"#).unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::TriggerRecompute);
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
    }

    #[test]
    fn test_truncate_char_boundary() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
