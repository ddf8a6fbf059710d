//! The shared watch-list store.
//!
//! [`WatchList`] owns the in-memory [`WatchState`] behind one async mutex and
//! the persistence backend it is committed to. Conversation turns and
//! reconciliation ticks both work inside a [`WatchSession`], which holds the
//! lock from the first read until after the final commit:
//!
//! ```text
//! session() ──► mutate / read ──► commit() ──► drop (unlock)
//! ```
//!
//! Nothing outside a session can observe or change the state, so a tick and
//! a conversation turn never interleave.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::domain::{Removal, UserId, WatchState};
use crate::error::StoreError;
use crate::port::StatePersistence;

/// Watch list shared between the conversation front end and the reconciler.
pub struct WatchList {
    state: Mutex<WatchState>,
    persistence: Arc<dyn StatePersistence>,
    load_error: Option<String>,
}

impl WatchList {
    /// Load the persisted state, falling back to an empty one.
    ///
    /// A missing, unreadable, or corrupt state file is logged and otherwise
    /// ignored; the error message stays available via [`Self::load_error`].
    #[must_use]
    pub fn open(persistence: Arc<dyn StatePersistence>) -> Self {
        let (state, load_error) = match persistence.load() {
            Ok(mut state) => {
                if state.has_empty_contract() {
                    warn!("Persisted state has empty contract entries, dropping them");
                    state.prune_empty();
                }
                info!(
                    users = state.users().count(),
                    wallets = state.watched_count(),
                    "Watch list loaded"
                );
                (state, None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load watch list, starting empty");
                (WatchState::new(), Some(e.to_string()))
            }
        };

        Self {
            state: Mutex::new(state),
            persistence,
            load_error,
        }
    }

    /// Start from a given state without reading the backend.
    #[must_use]
    pub fn with_state(state: WatchState, persistence: Arc<dyn StatePersistence>) -> Self {
        Self {
            state: Mutex::new(state),
            persistence,
            load_error: None,
        }
    }

    /// Why the initial load fell back to an empty state, if it did.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Acquire the lock. Waits for any running turn or tick to finish.
    pub async fn session(&self) -> WatchSession<'_> {
        WatchSession {
            state: self.state.lock().await,
            persistence: self.persistence.as_ref(),
        }
    }

    /// Acquire the lock only if nobody holds it.
    #[must_use]
    pub fn try_session(&self) -> Option<WatchSession<'_>> {
        let state = self.state.try_lock().ok()?;
        Some(WatchSession {
            state,
            persistence: self.persistence.as_ref(),
        })
    }

    /// Copy of the current state, taken under the lock.
    pub async fn snapshot(&self) -> WatchState {
        self.state.lock().await.clone()
    }

    /// One complete turn: register a wallet and commit.
    ///
    /// Returns `true` if the wallet was newly added. A failed commit is
    /// logged and the wallet stays registered in memory.
    pub async fn add_wallet(&self, user: UserId, contract: &str, wallet: &str) -> bool {
        let mut session = self.session().await;
        let added = session.add_wallet(user, contract, wallet);
        if session.commit().is_err() {
            debug!(user = %user, "Wallet added in memory only");
        }
        added
    }

    /// One complete turn: remove a wallet and commit.
    pub async fn remove_wallet(&self, user: UserId, contract: &str, wallet: &str) -> Removal {
        let mut session = self.session().await;
        let removal = session.remove_wallet(user, contract, wallet);
        if session.commit().is_err() {
            debug!(user = %user, "Wallet removed in memory only");
        }
        removal
    }

    pub async fn list_contracts(&self, user: UserId) -> Vec<String> {
        self.session().await.list_contracts(user)
    }

    pub async fn list_wallets(&self, user: UserId, contract: &str) -> Vec<String> {
        self.session().await.list_wallets(user, contract)
    }
}

/// Exclusive access to the watch list until dropped.
///
/// Dereferences to [`WatchState`] for reads and mutations.
pub struct WatchSession<'a> {
    state: MutexGuard<'a, WatchState>,
    persistence: &'a dyn StatePersistence,
}

impl std::fmt::Debug for WatchSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSession")
            .field("state", &*self.state)
            .finish_non_exhaustive()
    }
}

impl WatchSession<'_> {
    /// Write the whole state to the backend.
    ///
    /// Failures are logged and returned; the in-memory state stays
    /// authoritative until a later commit succeeds.
    pub fn commit(&self) -> Result<(), StoreError> {
        match self.persistence.save(&self.state) {
            Ok(()) => {
                debug!(wallets = self.state.watched_count(), "Watch list committed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to commit watch list");
                Err(e)
            }
        }
    }
}

impl Deref for WatchSession<'_> {
    type Target = WatchState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for WatchSession<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}
