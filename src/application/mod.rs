//! Application services: the shared watch list, the reconciliation job, and
//! the conversation state machine that edits the watch list.

pub mod conversation;
pub mod dialog;
pub mod reconcile;
pub mod watchlist;

pub use dialog::Dialogs;
pub use reconcile::{Reconciler, TickReport};
pub use watchlist::{WatchList, WatchSession};
