//! Process-local state backend.

use parking_lot::RwLock;

use crate::domain::WatchState;
use crate::error::StoreError;
use crate::port::StatePersistence;

/// Keeps the last saved state in memory only.
///
/// Used by `tokenwatch tick --dry-run` so a one-shot pass never touches the
/// state file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<WatchState>,
}

impl MemoryStore {
    /// Create a new store that starts from `state`.
    #[must_use]
    pub fn new(state: WatchState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }
}

impl StatePersistence for MemoryStore {
    fn load(&self) -> Result<WatchState, StoreError> {
        Ok(self.state.read().clone())
    }

    fn save(&self, state: &WatchState) -> Result<(), StoreError> {
        *self.state.write() = state.clone();
        Ok(())
    }
}
