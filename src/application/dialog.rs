//! Per-chat conversation driver.
//!
//! [`Dialogs`] remembers where each chat is in the menu and runs one
//! [`conversation::step`] per input inside a watch-list session, committing
//! before the lock is released.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::conversation::{self, DialogState, Input, Screen};
use super::watchlist::WatchList;
use crate::domain::UserId;

/// Conversation state for every chat, in memory only.
pub struct Dialogs {
    watch: Arc<WatchList>,
    states: Mutex<HashMap<UserId, DialogState>>,
}

impl Dialogs {
    #[must_use]
    pub fn new(watch: Arc<WatchList>) -> Self {
        Self {
            watch,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one input from `user` and return the screen to show.
    ///
    /// Waits for any running tick. A failed commit is logged by the session
    /// and the turn still completes against the in-memory state.
    pub async fn handle(&self, user: UserId, input: Input) -> Screen {
        let mut session = self.watch.session().await;

        let current = self.states.lock().remove(&user).unwrap_or_default();
        let turn = conversation::step(&mut session, user, current, input);
        let committed = session.commit().is_ok();
        drop(session);

        debug!(user = %user, state = ?turn.next, committed, "Conversation turn");
        if turn.next != DialogState::MainMenu {
            self.states.lock().insert(user, turn.next);
        }
        turn.screen
    }

    /// Where `user` currently is.
    #[must_use]
    pub fn state(&self, user: UserId) -> DialogState {
        self.states.lock().get(&user).cloned().unwrap_or_default()
    }
}
