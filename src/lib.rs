//! # arb-sync-core: Kalshi ↔ Polymarket opportunity sync for the dashboard
//!
//! Native N-API module that keeps the dashboard's opportunity list in sync
//! with the arbitrage backend:
//!
//! - **API client** for the list and recompute endpoints via `reqwest`
//! - **Normalizer** turning raw backend records into display-ready rows
//! - **Sync controller** serializing load / refresh / chained reload
//! - **Selection** of the opportunity shown in the detail view
//!
//! ## Architecture
//!
//! ```text
//! JS ─ loadOpportunities / refreshOpportunities ─▶ [SyncController]
//!                                                      │
//!                         [ArbitrageApiClient] ◀───────┘
//!                                  │ raw records
//!                            [normalizer] ─▶ SyncState ─▶ onSyncState → JS
//! ```
//!
//! ## Usage from Node.js
//!
//! ```javascript
//! const arbSync = require('./arb-sync-core');
//!
//! arbSync.initSync({ baseUrl: 'http://localhost:8000', minProfit: 0.001 });
//! arbSync.onSyncState((state) => render(state));
//!
//! await arbSync.refreshOpportunities();
//! arbSync.selectOpportunity('0');
//! ```

pub mod bridge;
pub mod client;
pub mod normalizer;
pub mod sync;
pub mod types;

// N-API functions live in bridge/napi_exports.rs; napi_derive registers them.
