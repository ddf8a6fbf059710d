//! Exchange-free domain types: the watch list and balance changes.
//!
//! Nothing here performs I/O. Persistence, locking, and balance lookups live
//! behind the traits in [`crate::port`].

pub mod change;
pub mod watch;

pub use change::BalanceChange;
pub use watch::{LastAmount, Removal, UserId, WatchEntry, WatchState};
