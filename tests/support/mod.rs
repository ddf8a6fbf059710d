#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tokenwatch::adapter::outbound::file::JsonFileStore;
use tokenwatch::application::{Reconciler, WatchList};
use tokenwatch::domain::UserId;
use tokenwatch::testkit::balance::ScriptedBalances;
use tokenwatch::testkit::notifier::RecordingNotifier;

pub const ALICE: UserId = UserId(1001);
pub const BOB: UserId = UserId(-2002);

/// A state file in its own temporary directory.
pub struct StateDir {
    dir: TempDir,
}

impl StateDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("storage.json")
    }

    pub fn store(&self) -> Arc<JsonFileStore> {
        Arc::new(JsonFileStore::new(self.path()))
    }

    /// Open a fresh watch list from the file, as a restarted process would.
    pub fn open(&self) -> Arc<WatchList> {
        Arc::new(WatchList::open(self.store()))
    }
}

/// Reconciler wired to scripted balances and a recording notifier.
pub fn reconciler(
    watch: &Arc<WatchList>,
) -> (Reconciler, Arc<ScriptedBalances>, RecordingNotifier) {
    reconciler_with(watch, Arc::new(ScriptedBalances::new()))
}

pub fn reconciler_with(
    watch: &Arc<WatchList>,
    source: Arc<ScriptedBalances>,
) -> (Reconciler, Arc<ScriptedBalances>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let reconciler = Reconciler::new(
        Arc::clone(watch),
        source.clone(),
        Arc::new(notifier.clone()),
    );
    (reconciler, source, notifier)
}
