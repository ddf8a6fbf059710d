//! In-memory [`StatePersistence`] that records every save.

use std::io;

use parking_lot::Mutex;

use crate::domain::WatchState;
use crate::error::StoreError;
use crate::port::StatePersistence;

/// Persistence double with switchable failures and a save history.
#[derive(Debug, Default)]
pub struct SpyPersistence {
    initial: Option<WatchState>,
    saves: Mutex<Vec<WatchState>>,
    fail_load: bool,
    fail_save: bool,
}

impl SpyPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// `load` returns this state.
    pub fn with_state(state: WatchState) -> Self {
        Self {
            initial: Some(state),
            ..Self::default()
        }
    }

    /// `load` always fails.
    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    /// `save` always fails (and records nothing).
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().len()
    }

    pub fn last_saved(&self) -> Option<WatchState> {
        self.saves.lock().last().cloned()
    }

    pub fn saved(&self) -> Vec<WatchState> {
        self.saves.lock().clone()
    }
}

impl StatePersistence for SpyPersistence {
    fn load(&self) -> Result<WatchState, StoreError> {
        if self.fail_load {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "scripted load failure").into());
        }
        Ok(self.initial.clone().unwrap_or_default())
    }

    fn save(&self, state: &WatchState) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(
                io::Error::new(io::ErrorKind::PermissionDenied, "scripted save failure").into(),
            );
        }
        self.saves.lock().push(state.clone());
        Ok(())
    }
}
