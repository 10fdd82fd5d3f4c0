use tracing::debug;

use crate::{
    domain::AppState,
    reducer::{reduce, Action},
};

/// Anything that owns an [`AppState`] and applies actions to it.
///
/// Services validate against `state()` and then `dispatch`, so the same
/// checks run whether or not persistence is attached.
pub trait StateContainer {
    fn state(&self) -> &AppState;
    fn dispatch(&mut self, action: Action);
}

/// Explicit state container: the single owner of the current state and the
/// serialization point for every mutation.
#[derive(Debug, Clone, Default)]
pub struct AppStore {
    state: AppState,
    revision: u64,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: AppState) -> Self {
        Self { state, revision: 0 }
    }

    /// Number of actions applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Runs a state-to-state step such as a hydration pass.
    pub(crate) fn replace_with<F>(&mut self, step: F)
    where
        F: FnOnce(AppState) -> AppState,
    {
        let state = std::mem::take(&mut self.state);
        self.state = step(state);
    }
}

impl StateContainer for AppStore {
    fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch(&mut self, action: Action) {
        debug!(action = action.name(), revision = self.revision, "dispatch");
        self.replace_with(|state| reduce(state, action));
        self.revision += 1;
    }
}
