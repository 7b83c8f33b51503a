use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::LocalState;
use crate::ports::StateStore;

/// In-memory store holding only the latest snapshot.
///
/// Snapshots are shared as `Arc`s and swapped whole, so a reader holds the
/// lock just long enough to clone the pointer.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    current: RwLock<Arc<LocalState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn publish(&self, state: LocalState) {
        let state = Arc::new(state);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    fn latest(&self) -> Arc<LocalState> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
