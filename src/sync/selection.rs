//! Currently inspected opportunity.
//!
//! Holds a snapshot clone, so a later refresh never changes what is shown.
//! `select` and `clear` are total; `select_by_id` resolves against a list.

use crate::sync::state::SyncState;
use crate::types::opportunity::Opportunity;

#[derive(Debug, Default)]
pub struct SelectionStore {
    selected: Option<Opportunity>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection, replacing any previous one.
    pub fn select(&mut self, opportunity: Opportunity) {
        self.selected = Some(opportunity);
    }

    /// Select the opportunity with `id` from `state`'s current list.
    /// Unknown ids return false and leave the selection unchanged.
    pub fn select_by_id(&mut self, state: &SyncState, id: &str) -> bool {
        match state.find(id) {
            Some(opportunity) => {
                self.select(opportunity.clone());
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&Opportunity> {
        self.selected.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use serde_json::json;

    #[test]
    fn test_select_clear_overwrite() {
        let list = normalize(&[
            json!({"direction": "kalshi_to_poly", "kalshi_ticker": "A1", "profit": 0.02}),
            json!({"direction": "poly_to_kalshi", "kalshi_ticker": "B2", "profit": 0.05}),
        ]);
        let mut store = SelectionStore::new();
        assert!(store.selected().is_none());

        store.select(list[0].clone());
        assert_eq!(store.selected(), Some(&list[0]));

        store.select(list[1].clone());
        assert_eq!(store.selected(), Some(&list[1]));

        store.clear();
        assert!(store.selected().is_none());

        // Clearing twice is fine
        store.clear();
        assert!(store.selected().is_none());
    }

    fn loaded_state(records: &[serde_json::Value]) -> SyncState {
        let mut state = SyncState::new();
        state.begin(crate::sync::Phase::Loading);
        state.apply_opportunities(normalize(records), 1);
        state
    }

    #[test]
    fn test_select_by_id_from_current_list() {
        let state = loaded_state(&[
            json!({"direction": "kalshi_to_poly", "kalshi_ticker": "A1", "profit": 0.02}),
            json!({"direction": "poly_to_kalshi", "kalshi_ticker": "B2", "profit": 0.05}),
        ]);
        let mut store = SelectionStore::new();

        assert!(store.select_by_id(&state, "1"));
        assert_eq!(store.selected(), state.find("1"));
        assert_eq!(store.selected().map(|o| o.ticker.as_str()), Some("B2 / -"));
    }

    #[test]
    fn test_select_unknown_id_keeps_selection() {
        let state = loaded_state(&[json!({"kalshi_ticker": "A1", "profit": 0.02})]);
        let mut store = SelectionStore::new();

        assert!(!store.select_by_id(&state, "0x"));
        assert!(store.selected().is_none());

        assert!(store.select_by_id(&state, "0"));
        assert!(!store.select_by_id(&state, "5"));
        assert_eq!(store.selected(), state.find("0"));
    }

    #[test]
    fn test_selection_survives_list_replacement() {
        let mut state = loaded_state(&[json!({"kalshi_ticker": "OLD", "profit": 0.01})]);
        let mut store = SelectionStore::new();
        assert!(store.select_by_id(&state, "0"));

        state.begin(crate::sync::Phase::Loading);
        state.apply_opportunities(normalize(&[json!({"kalshi_ticker": "NEW"})]), 2);

        assert_eq!(store.selected().map(|o| o.ticker.as_str()), Some("OLD / -"));
    }
}
