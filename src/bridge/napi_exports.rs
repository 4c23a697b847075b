//! N-API exported functions: the public API surface for the dashboard.
//!
//! JS drives the pipeline with `loadOpportunities()` / `refreshOpportunities()`
//! and renders whatever `onSyncState` pushes. Selection is kept here too so the
//! detail view survives list refreshes.
//!
//! Callback policy: only `on_sync_state` calls back into Node.js.

use crate::bridge::callbacks::{forward_state_changes, get_registry, JsStateCallback};
use crate::client::ArbitrageApiClient;
use crate::sync::{SelectionStore, SyncController};
use crate::types::config::SyncConfig;
use crate::types::snapshot::{NapiOpportunity, NapiSyncOutcome, NapiSyncState};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::info;

// =============================================================================
// GLOBAL STATE
// =============================================================================

/// Global sync controller, created once by `initSync()`.
static CONTROLLER: OnceLock<Arc<SyncController>> = OnceLock::new();

fn get_controller() -> Result<Arc<SyncController>> {
    CONTROLLER
        .get()
        .cloned()
        .ok_or_else(|| napi::Error::from_reason("Sync not initialized. Call initSync() first."))
}

/// Global selection, independent of the controller state.
static SELECTION: OnceLock<Mutex<SelectionStore>> = OnceLock::new();

fn with_selection<R>(f: impl FnOnce(&mut SelectionStore) -> R) -> R {
    let store = SELECTION.get_or_init(|| Mutex::new(SelectionStore::new()));
    let mut guard = store.lock().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
}

/// Global tokio runtime for network calls and state forwarding.
static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

pub fn get_runtime() -> &'static tokio::runtime::Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("arb-sync")
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    // Only once; ignore error if the host already installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

// =============================================================================
// SYNC N-API FUNCTIONS
// =============================================================================

/// Initialize the sync pipeline with the given configuration.
///
/// Must be called before any other function. Creates the HTTP client and the
/// controller, starts state forwarding and, unless `loadOnInit` is false,
/// kicks off the first load.
#[napi]
pub fn init_sync(config: Option<SyncConfig>) -> Result<()> {
    let config = config.unwrap_or_default();
    init_tracing(config.verbose());

    info!("Initializing opportunity sync ({})", config.base_url());

    let client = ArbitrageApiClient::from_config(&config)
        .map_err(|e| napi::Error::from_reason(format!("Failed to init sync: {}", e)))?;
    let controller = Arc::new(SyncController::new(Arc::new(client), config.min_profit()));

    CONTROLLER
        .set(Arc::clone(&controller))
        .map_err(|_| napi::Error::from_reason("Sync already initialized"))?;

    let runtime = get_runtime();
    runtime.spawn(forward_state_changes(
        get_registry().as_ref(),
        controller.subscribe(),
    ));

    info!(
        "Opportunity sync initialized (min_profit={})",
        controller.min_profit()
    );

    if config.load_on_init() {
        runtime.spawn(async move {
            controller.load().await;
        });
    }

    Ok(())
}

/// Fetch the opportunity list. Resolves with `status: "skipped"` while busy.
#[napi]
pub async fn load_opportunities() -> Result<NapiSyncOutcome> {
    let controller = get_controller()?;
    let outcome = get_runtime()
        .spawn(async move { controller.load().await })
        .await
        .map_err(|e| napi::Error::from_reason(format!("Load task failed: {}", e)))?;
    Ok(outcome.into())
}

/// Trigger a backend recompute, then reload. Resolves with `status: "skipped"` while busy.
#[napi]
pub async fn refresh_opportunities() -> Result<NapiSyncOutcome> {
    let controller = get_controller()?;
    let outcome = get_runtime()
        .spawn(async move { controller.refresh().await })
        .await
        .map_err(|e| napi::Error::from_reason(format!("Refresh task failed: {}", e)))?;
    Ok(outcome.into())
}

/// Current sync state snapshot.
#[napi]
pub fn get_sync_state() -> Result<NapiSyncState> {
    let controller = get_controller()?;
    let state = controller.snapshot();
    Ok(NapiSyncState::from(&state))
}

/// Whether a load or refresh is in flight (disable the refresh button).
#[napi]
pub fn is_sync_busy() -> Result<bool> {
    Ok(get_controller()?.is_busy())
}

/// Register callback for sync state changes. Fires once immediately.
#[napi(ts_args_type = "callback: (state: NapiSyncState) => void")]
pub fn on_sync_state(callback: JsFunction) -> Result<()> {
    let tsfn: JsStateCallback = callback.create_threadsafe_function(0, |ctx| Ok(vec![ctx.value]))?;

    // Snapshot is read after registration so no newer state can slip past it
    get_runtime().block_on(get_registry().set_on_sync_state(tsfn, || {
        CONTROLLER.get().map(|c| NapiSyncState::from(&c.snapshot()))
    }));

    info!("onSyncState callback registered");
    Ok(())
}

// =============================================================================
// SELECTION N-API FUNCTIONS
// =============================================================================

/// Select an opportunity from the current list by id.
/// Returns false (selection unchanged) when the id is not in the list.
#[napi]
pub fn select_opportunity(id: String) -> Result<bool> {
    let state = get_controller()?.snapshot();
    let found = with_selection(|store| store.select_by_id(&state, &id));
    if !found {
        tracing::debug!("[Bridge] select_opportunity: id {} not in current list", id);
    }
    Ok(found)
}

/// Dismiss the detail view.
#[napi]
pub fn clear_selection() -> Result<()> {
    with_selection(|store| store.clear());
    Ok(())
}

/// Currently selected opportunity, if any. May be older than the live list.
#[napi]
pub fn get_selection() -> Result<Option<NapiOpportunity>> {
    Ok(with_selection(|store| store.selected().map(NapiOpportunity::from)))
}
