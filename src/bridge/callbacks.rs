//! Callback helpers for Rust → Node.js communication.
//!
//! Only `on_sync_state` exists. It is invoked on every `SyncState` transition so
//! the dashboard can re-render without polling.
//!
//! Every snapshot is built while the registry lock is held. Registration and
//! forwarding therefore deliver states in the order they were read, and a
//! freshly registered callback never receives a state older than the last one
//! it was sent.

use crate::sync::SyncState;
use crate::types::snapshot::NapiSyncState;
use napi::threadsafe_function::{
    ErrorStrategy, ThreadsafeFunction, ThreadsafeFunctionCallMode,
};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::warn;

/// JS `onSyncState` callback.
pub type JsStateCallback = ThreadsafeFunction<NapiSyncState, ErrorStrategy::Fatal>;

/// Receiver of state snapshots.
pub trait StateSink: Send + Sync {
    fn deliver(&self, state: NapiSyncState);
}

impl StateSink for JsStateCallback {
    fn deliver(&self, state: NapiSyncState) {
        self.call(state, ThreadsafeFunctionCallMode::NonBlocking);
    }
}

/// Stores the registered Node.js callback.
pub struct CallbackRegistry<S = JsStateCallback> {
    on_sync_state: Mutex<Option<S>>,
}

impl<S: StateSink> Default for CallbackRegistry<S> {
    fn default() -> Self {
        Self {
            on_sync_state: Mutex::new(None),
        }
    }
}

impl<S: StateSink> CallbackRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the callback and send it the current state.
    ///
    /// `current` runs after the callback is stored, under the same lock the
    /// forwarder takes, so any later transition reaches the callback too.
    pub async fn set_on_sync_state(
        &self,
        callback: S,
        current: impl FnOnce() -> Option<NapiSyncState>,
    ) {
        let mut cb = self.on_sync_state.lock().await;
        let sink = cb.insert(callback);
        if let Some(state) = current() {
            sink.deliver(state);
        }
    }

    /// Build a snapshot and send it, if a callback is registered.
    /// Returns false (snapshot not built) when there is none.
    pub async fn emit_sync_state(&self, snapshot: impl FnOnce() -> NapiSyncState) -> bool {
        let cb = self.on_sync_state.lock().await;
        match cb.as_ref() {
            Some(sink) => {
                sink.deliver(snapshot());
                true
            }
            None => false,
        }
    }
}

/// Push every state change to the registered callback until the sender drops.
pub async fn forward_state_changes<S: StateSink>(
    registry: &CallbackRegistry<S>,
    mut rx: watch::Receiver<SyncState>,
) {
    while rx.changed().await.is_ok() {
        registry
            .emit_sync_state(|| NapiSyncState::from(&*rx.borrow_and_update()))
            .await;
    }
    warn!("[Bridge] State forwarder ended, controller dropped");
}

/// Get a reference to the global callback registry.
pub fn get_registry() -> &'static Arc<CallbackRegistry> {
    use std::sync::OnceLock;
    static REGISTRY: OnceLock<Arc<CallbackRegistry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Arc::new(CallbackRegistry::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::sync::Phase;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    /// Records the phase of every delivered snapshot.
    #[derive(Clone, Default)]
    struct RecordingSink {
        phases: Arc<StdMutex<Vec<String>>>,
    }

    impl RecordingSink {
        fn phases(&self) -> Vec<String> {
            self.phases.lock().unwrap().clone()
        }
    }

    impl StateSink for RecordingSink {
        fn deliver(&self, state: NapiSyncState) {
            self.phases.lock().unwrap().push(state.phase);
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_register_sends_current_state_once() {
        let registry = CallbackRegistry::<RecordingSink>::new();
        let sink = RecordingSink::default();

        registry
            .set_on_sync_state(sink.clone(), || Some(NapiSyncState::from(&SyncState::new())))
            .await;

        assert_eq!(sink.phases(), vec!["idle"]);
    }

    #[tokio::test]
    async fn test_emit_without_callback_builds_nothing() {
        let registry = CallbackRegistry::<RecordingSink>::new();
        let built = registry
            .emit_sync_state(|| panic!("snapshot built with no callback"))
            .await;
        assert!(!built);
    }

    #[tokio::test]
    async fn test_late_registration_sees_latest_state() {
        let (tx, rx) = watch::channel(SyncState::new());
        let registry = Arc::new(CallbackRegistry::<RecordingSink>::new());
        let forwarder = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { forward_state_changes(&*registry, rx).await }
        });

        // A whole load completes before anyone listens
        tx.send_modify(|s| {
            s.begin(Phase::Loading);
        });
        settle().await;
        tx.send_modify(|s| {
            s.apply_opportunities(
                normalize(&[json!({"direction": "kalshi_to_poly", "kalshi_ticker": "A1"})]),
                1,
            )
        });
        settle().await;

        let sink = RecordingSink::default();
        registry
            .set_on_sync_state(sink.clone(), || Some(NapiSyncState::from(&*tx.borrow())))
            .await;
        settle().await;

        let seen = sink.phases();
        assert!(!seen.contains(&"loading".to_string()), "{:?}", seen);
        assert_eq!(seen.last().map(String::as_str), Some("idle"));

        // Later transitions are forwarded in order
        tx.send_modify(|s| {
            s.begin(Phase::Refreshing);
        });
        settle().await;
        assert_eq!(sink.phases().last().map(String::as_str), Some("refreshing"));

        drop(tx);
        forwarder.await.unwrap();
    }

    #[tokio::test]
    async fn test_replacing_callback_switches_delivery() {
        let (tx, rx) = watch::channel(SyncState::new());
        let registry = Arc::new(CallbackRegistry::<RecordingSink>::new());
        let forwarder = tokio::spawn({
            let registry = Arc::clone(&registry);
            async move { forward_state_changes(&*registry, rx).await }
        });

        let first = RecordingSink::default();
        registry
            .set_on_sync_state(first.clone(), || Some(NapiSyncState::from(&*tx.borrow())))
            .await;
        let second = RecordingSink::default();
        registry
            .set_on_sync_state(second.clone(), || Some(NapiSyncState::from(&*tx.borrow())))
            .await;

        tx.send_modify(|s| {
            s.begin(Phase::Loading);
        });
        settle().await;

        assert_eq!(first.phases(), vec!["idle"]);
        assert_eq!(second.phases(), vec!["idle", "loading"]);

        drop(tx);
        forwarder.await.unwrap();
    }
}
