//! Persistence port for the watch list.

use crate::domain::WatchState;
use crate::error::StoreError;

/// Durable storage for the whole watch list.
///
/// The state is always written and read as one unit; there are no
/// incremental updates.
pub trait StatePersistence: Send + Sync {
    /// Read the persisted state.
    ///
    /// A missing backing file is not an error and yields an empty state.
    fn load(&self) -> Result<WatchState, StoreError>;

    /// Overwrite the persisted state with `state`.
    fn save(&self, state: &WatchState) -> Result<(), StoreError>;
}
