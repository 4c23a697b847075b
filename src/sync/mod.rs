//! Opportunity synchronization: phase machine, controller and selection.

pub mod controller;
pub mod selection;
pub mod state;

pub use self::controller::{SyncController, SyncOutcome};
pub use self::selection::SelectionStore;
pub use self::state::{Phase, SyncState};
