//! Sync state: phase machine plus the last applied opportunity list.
//!
//! Every transition is a method on `SyncState`. The controller applies each one
//! exactly once through its watch channel; nothing else writes the state.
//!
//! ```text
//!  Idle/Error ──load()──▶ Loading ──ok──▶ Idle
//!      │                     └────err──▶ Error
//!      └──refresh()──▶ Refreshing ──ok──▶ Loading (chained fetch)
//!                           └─────err──▶ Error
//! ```

use std::sync::Arc;

use crate::types::opportunity::Opportunity;

// =============================================================================
// PHASE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Refreshing,
    Error,
}

impl Phase {
    /// A remote call is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Loading | Phase::Refreshing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Refreshing => "refreshing",
            Phase::Error => "error",
        }
    }
}

// =============================================================================
// SYNC STATE
// =============================================================================

#[derive(Debug, Clone)]
pub struct SyncState {
    pub phase: Phase,

    /// Last successfully fetched list. Replaced wholesale, never edited.
    pub opportunities: Arc<[Opportunity]>,

    /// Present only while `phase == Error`.
    pub error_message: Option<String>,

    /// Bumped once per applied fetch result.
    pub revision: u64,

    /// Unix ms of the last applied fetch.
    pub last_synced_at_ms: Option<i64>,

    /// `refreshed` flag reported by the last successful recompute trigger.
    pub last_recompute: Option<bool>,
}

impl Default for SyncState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            opportunities: Arc::from(Vec::new()),
            error_message: None,
            revision: 0,
            last_synced_at_ms: None,
            last_recompute: None,
        }
    }
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Look up an opportunity in the current list by id.
    pub fn find(&self, id: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.id == id)
    }

    /// Idle/Error → `to`. Returns false (state untouched) while busy.
    pub fn begin(&mut self, to: Phase) -> bool {
        debug_assert!(to.is_busy());
        if self.phase.is_busy() {
            return false;
        }
        self.phase = to;
        self.error_message = None;
        true
    }

    /// Refreshing → Loading after a successful recompute trigger.
    pub fn begin_chained_load(&mut self, refreshed: bool) {
        debug_assert_eq!(self.phase, Phase::Refreshing);
        self.phase = Phase::Loading;
        self.last_recompute = Some(refreshed);
    }

    /// Loading → Idle with a freshly normalized list.
    pub fn apply_opportunities(&mut self, opportunities: Vec<Opportunity>, now_ms: i64) {
        debug_assert_eq!(self.phase, Phase::Loading);
        self.opportunities = opportunities.into();
        self.phase = Phase::Idle;
        self.error_message = None;
        self.revision += 1;
        self.last_synced_at_ms = Some(now_ms);
    }

    /// Loading/Refreshing → Error. The previous list stays visible.
    pub fn apply_failure(&mut self, message: String) {
        debug_assert!(self.phase.is_busy());
        self.phase = Phase::Error;
        self.error_message = Some(message);
    }
}
