use std::sync::Arc;

use crate::domain::LocalState;

/// Port for publishing and reading the latest local state
pub trait StateStore: Send + Sync {
    /// Replace the published snapshot wholesale
    fn publish(&self, state: LocalState);

    /// Get the most recent snapshot without blocking on an update
    fn latest(&self) -> Arc<LocalState>;
}

/// Shared read handle onto a state store
pub type StateReader = Arc<dyn StateStore>;
