//! Sync controller: single writer of `SyncState`.
//!
//! Coordinates initial load, recompute-triggered refresh and the chained reload.
//! At most one remote operation is in flight: the busy check and the phase change
//! happen together inside the watch channel, so a second caller is turned away
//! before it can issue a request.

use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::client::{ApiError, OpportunitySource};
use crate::normalizer::normalize;
use crate::sync::state::{Phase, SyncState};

/// Result of a `load()` or `refresh()` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// A new list was applied. `recomputed` is set for refreshes.
    Synced {
        opportunities: usize,
        recomputed: Option<bool>,
    },
    /// The operation failed; the message is also in `SyncState::error_message`.
    Failed { message: String },
    /// Another operation was in flight. No request was made.
    Skipped,
}

pub struct SyncController {
    source: Arc<dyn OpportunitySource>,
    min_profit: f64,
    state_tx: watch::Sender<SyncState>,
}

impl SyncController {
    pub fn new(source: Arc<dyn OpportunitySource>, min_profit: f64) -> Self {
        let (state_tx, _) = watch::channel(SyncState::new());
        Self {
            source,
            min_profit,
            state_tx,
        }
    }

    pub fn min_profit(&self) -> f64 {
        self.min_profit
    }

    /// Read-only copy of the current state. The list is shared, not copied.
    pub fn snapshot(&self) -> SyncState {
        self.state_tx.borrow().clone()
    }

    /// Change notifications for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state_tx.subscribe()
    }

    /// True while a load or refresh is in flight.
    pub fn is_busy(&self) -> bool {
        self.state_tx.borrow().is_busy()
    }

    /// Fetch the opportunity list. Ignored while busy.
    pub async fn load(&self) -> SyncOutcome {
        if !self.try_begin(Phase::Loading) {
            debug!("[Sync] load() ignored, operation in flight");
            return SyncOutcome::Skipped;
        }
        self.fetch_and_apply(None).await
    }

    /// Trigger a backend recompute, then reload the list. Ignored while busy.
    ///
    /// The reload starts only after the trigger has returned.
    pub async fn refresh(&self) -> SyncOutcome {
        if !self.try_begin(Phase::Refreshing) {
            debug!("[Sync] refresh() ignored, operation in flight");
            return SyncOutcome::Skipped;
        }

        info!("[Sync] Triggering backend recompute");
        match self.source.trigger_recompute().await {
            Ok(refreshed) => {
                if !refreshed {
                    debug!("[Sync] Backend data still fresh, reloading anyway");
                }
                self.state_tx
                    .send_modify(|state| state.begin_chained_load(refreshed));
                self.fetch_and_apply(Some(refreshed)).await
            }
            Err(err) => self.fail(err),
        }
    }

    // =========================================================================
    // TRANSITIONS
    // =========================================================================

    fn try_begin(&self, to: Phase) -> bool {
        self.state_tx.send_if_modified(|state| state.begin(to))
    }

    async fn fetch_and_apply(&self, recomputed: Option<bool>) -> SyncOutcome {
        let start = Instant::now();

        match self.source.fetch_opportunities(self.min_profit).await {
            Ok(raw) => {
                let opportunities = normalize(&raw);
                let count = opportunities.len();
                let now = now_ms();
                self.state_tx
                    .send_modify(move |state| state.apply_opportunities(opportunities, now));

                info!(
                    count,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "[Sync] Opportunities loaded"
                );
                SyncOutcome::Synced {
                    opportunities: count,
                    recomputed,
                }
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&self, err: ApiError) -> SyncOutcome {
        let message = err.to_string();
        if err.is_transport() {
            warn!(endpoint = ?err.endpoint(), status = ?err.http_status(), "[Sync] {}", message);
        } else {
            error!(endpoint = ?err.endpoint(), "[Sync] {}", message);
        }

        let stored = message.clone();
        self.state_tx.send_modify(move |state| state.apply_failure(stored));
        SyncOutcome::Failed { message }
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

// =============================================================================
// TESTS
// =============================================================================
