use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use draftline_core::{reduce, Action, PipelineState};

/// Shared handle to the single workflow state root.
///
/// Every change goes through [`reduce`]; the lock is only held while a
/// transition runs, never across an await.
#[derive(Clone)]
pub struct WorkflowStore {
    inner: Arc<Mutex<PipelineState>>,
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new(PipelineState::initial())
    }
}

impl WorkflowStore {
    pub fn new(state: PipelineState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PipelineState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PipelineState {
        self.lock().clone()
    }

    pub fn apply(&self, action: Action) {
        let mut guard = self.lock();
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, action);
    }

    /// Apply `actions` in one critical section, but only if `guard` accepts the
    /// current state. Returns whether they were applied.
    pub fn apply_if(
        &self,
        guard: impl FnOnce(&PipelineState) -> bool,
        actions: impl IntoIterator<Item = Action>,
    ) -> bool {
        let mut state = self.lock();
        if !guard(&state) {
            return false;
        }
        for action in actions {
            let current = std::mem::take(&mut *state);
            *state = reduce(current, action);
        }
        true
    }
}
