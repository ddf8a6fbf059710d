//! Handler for the `show` command.

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::file::JsonFileStore;
use crate::domain::{LastAmount, WatchState};
use crate::error::{Result, StoreError};
use crate::infrastructure::config::settings::Config;
use crate::port::StatePersistence;

/// Print every watched wallet with its last observed amount.
pub fn execute(config: &Config) -> Result<()> {
    let store = JsonFileStore::new(&config.storage.path);
    let state = match store.load() {
        Ok(state) => state,
        Err(e) => {
            output::warning(&format!("State file unreadable, showing nothing: {e}"));
            WatchState::new()
        }
    };

    if output::is_json() {
        let value = serde_json::to_value(&state).map_err(StoreError::from)?;
        output::document("watch_list", value);
        return Ok(());
    }

    output::section("Watch List");
    output::field("State", store.path().display());
    output::field("Wallets", state.watched_count());

    let mut user = None;
    for entry in state.entries() {
        if user != Some(entry.user) {
            user = Some(entry.user);
            output::section(&format!("User {}", entry.user));
        }
        output::field(&short(entry.wallet), describe(entry.contract, &entry.last));
    }

    Ok(())
}

fn describe(contract: &str, last: &LastAmount) -> String {
    match last {
        Some(amount) => format!("{amount} of {contract}"),
        None => format!("pending ({contract})"),
    }
}

/// Shorten long addresses to `0x1234…abcd`.
fn short(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
