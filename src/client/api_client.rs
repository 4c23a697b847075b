//! Arbitrage backend API client: the two GET endpoints behind `OpportunitySource`.
//!
//! Uses a persistent `reqwest::Client` created once at `initSync()`.
//! No retries: a failed call surfaces as `ApiError` and the caller decides.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::error::{ApiError, Endpoint};
use crate::client::wire::{self, RecomputeReport};
use crate::client::OpportunitySource;
use crate::types::config::SyncConfig;

// =============================================================================
// API CLIENT STATE
// =============================================================================

/// Persistent client for the arbitrage backend.
pub struct ArbitrageApiClient {
    client: reqwest::Client,
    base_url: String,
    list_path: String,
    recompute_path: String,
}

impl ArbitrageApiClient {
    /// Create a client with default endpoint paths and no timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&SyncConfig {
            base_url: Some(base_url.to_string()),
            ..Default::default()
        })
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(ms) = config.request_timeout_ms() {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build().map_err(|e| {
            ApiError::network(
                Endpoint::ListOpportunities,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            list_path: config.list_path().to_string(),
            recompute_path: config.recompute_path().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET <list_path>?min_profit=<min_profit>` → raw opportunity records.
    ///
    /// The threshold is forwarded as-is; filtering is the backend's job.
    pub async fn fetch_opportunities(&self, min_profit: f64) -> Result<Vec<Value>, ApiError> {
        let endpoint = Endpoint::ListOpportunities;
        let url = format!("{}{}", self.base_url, self.list_path);
        let request = self.client.get(&url).query(&[("min_profit", min_profit)]);

        let body = self.execute(endpoint, request).await?;
        let records = wire::decode_opportunity_list(&body)?;

        tracing::debug!(
            "[ArbApi] GET {} min_profit={} -> {} records",
            self.list_path,
            min_profit,
            records.len()
        );
        Ok(records)
    }

    /// `GET <recompute_path>` → full recompute report.
    pub async fn trigger_recompute_report(&self) -> Result<RecomputeReport, ApiError> {
        let endpoint = Endpoint::TriggerRecompute;
        let url = format!("{}{}", self.base_url, self.recompute_path);

        let body = self.execute(endpoint, self.client.get(&url)).await?;
        let report = wire::decode_recompute_report(&body)?;

        tracing::info!(
            refreshed = report.refreshed,
            matched_pairs = ?report.matched_pairs,
            note = report.note.as_deref().unwrap_or("-"),
            "[ArbApi] Recompute triggered"
        );
        Ok(report)
    }

    /// Send a request, require 2xx, return the body text.
    async fn execute(
        &self,
        endpoint: Endpoint,
        request: reqwest::RequestBuilder,
    ) -> Result<String, ApiError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::network(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(endpoint, e))?;

        tracing::trace!(
            "[ArbApi] Response status={}, body={}",
            status,
            wire::truncate(&body, 2000)
        );

        if !status.is_success() {
            tracing::warn!("[ArbApi] {:?} returned HTTP {}", endpoint, status);
            return Err(ApiError::status(
                endpoint,
                status.as_u16(),
                wire::truncate(&body, 500),
            ));
        }
        Ok(body)
    }
}

#[async_trait]
impl OpportunitySource for ArbitrageApiClient {
    async fn fetch_opportunities(&self, min_profit: f64) -> Result<Vec<Value>, ApiError> {
        ArbitrageApiClient::fetch_opportunities(self, min_profit).await
    }

    async fn trigger_recompute(&self) -> Result<bool, ApiError> {
        self.trigger_recompute_report().await.map(|r| r.refreshed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
