//! Remote operations against the arbitrage backend.
//!
//! `OpportunitySource` is the seam the sync controller depends on;
//! `ArbitrageApiClient` is the HTTP implementation.

pub mod api_client;
pub mod error;
pub mod wire;

use async_trait::async_trait;
use serde_json::Value;

pub use self::api_client::ArbitrageApiClient;
pub use self::error::{ApiError, Endpoint, TransportError};
pub use self::wire::RecomputeReport;

/// The two remote operations the sync pipeline needs.
#[async_trait]
pub trait OpportunitySource: Send + Sync {
    /// Raw opportunity records at or above `min_profit`.
    async fn fetch_opportunities(&self, min_profit: f64) -> Result<Vec<Value>, ApiError>;

    /// Ask the backend to regenerate its opportunity set.
    /// Returns whether it actually recomputed.
    async fn trigger_recompute(&self) -> Result<bool, ApiError>;
}
