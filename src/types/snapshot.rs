//! N-API snapshot structs, i.e. what the dashboard renders.
//!
//! Flat copies of `SyncState` / `Opportunity` for the Node.js boundary.
//! Built on demand; JS never gets a handle into the live state.

use napi_derive::napi;

use crate::sync::{SyncOutcome, SyncState};
use crate::types::opportunity::Opportunity;

/// One table row / detail view.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct NapiOpportunity {
    pub id: String,
    pub market: String,
    pub ticker: String,
    pub price: String,
    pub profit: String,
    pub direction: String, // "kalshi_to_poly" | "poly_to_kalshi"
    pub profit_value: Option<f64>,
    pub action_url: Option<String>,
    pub kalshi_url: Option<String>,
    pub polymarket_url: Option<String>,
    pub league: Option<String>,
    /// Source record as JSON text.
    pub raw_json: String,
}

/// Read-only view of the sync state.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct NapiSyncState {
    pub phase: String, // "idle" | "loading" | "refreshing" | "error"
    pub busy: bool,
    pub opportunities: Vec<NapiOpportunity>,
    pub error_message: Option<String>,
    pub revision: i64,
    pub last_synced_at_ms: Option<i64>,
    pub last_recompute: Option<bool>,
}

/// Result of `loadOpportunities()` / `refreshOpportunities()`.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct NapiSyncOutcome {
    pub status: String, // "synced" | "failed" | "skipped"
    pub opportunities: Option<i32>,
    pub recomputed: Option<bool>,
    pub error: Option<String>,
}

impl From<&Opportunity> for NapiOpportunity {
    fn from(o: &Opportunity) -> Self {
        Self {
            id: o.id.clone(),
            market: o.market.clone(),
            ticker: o.ticker.clone(),
            price: o.price.clone(),
            profit: o.profit.clone(),
            direction: o.direction.as_wire().to_string(),
            profit_value: o.profit_value,
            action_url: o.action_url.clone(),
            kalshi_url: o.kalshi_url.clone(),
            polymarket_url: o.polymarket_url.clone(),
            league: o.league.clone(),
            raw_json: o.raw.to_string(),
        }
    }
}

impl From<&SyncState> for NapiSyncState {
    fn from(s: &SyncState) -> Self {
        Self {
            phase: s.phase.as_str().to_string(),
            busy: s.is_busy(),
            opportunities: s.opportunities.iter().map(NapiOpportunity::from).collect(),
            error_message: s.error_message.clone(),
            revision: s.revision as i64,
            last_synced_at_ms: s.last_synced_at_ms,
            last_recompute: s.last_recompute,
        }
    }
}

impl From<SyncOutcome> for NapiSyncOutcome {
    fn from(outcome: SyncOutcome) -> Self {
        match outcome {
            SyncOutcome::Synced {
                opportunities,
                recomputed,
            } => Self {
                status: "synced".to_string(),
                opportunities: Some(opportunities as i32),
                recomputed,
                error: None,
            },
            SyncOutcome::Failed { message } => Self {
                status: "failed".to_string(),
                opportunities: None,
                recomputed: None,
                error: Some(message),
            },
            SyncOutcome::Skipped => Self {
                status: "skipped".to_string(),
                opportunities: None,
                recomputed: None,
                error: None,
            },
        }
    }
}
