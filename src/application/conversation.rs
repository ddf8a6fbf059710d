//! Menu-driven conversation for managing a user's watch list.
//!
//! The conversation is a small state machine. Each user turn is a
//! [`step`] that takes the current [`DialogState`] and an [`Input`], applies
//! at most one watch-list mutation, and returns the next state together with
//! the [`Screen`] to show.
//!
//! ```text
//!              add                 text                  text
//! MainMenu ─────────► AwaitContract ─────► AwaitWallet ─────────► MainMenu
//!    │  ▲                                              (wallet added)
//!    │  │ back
//!    │  │        c:<contract>                w:<wallet>
//!    └──┴─► ListContracts ───────────► ListWallets ──────► ListWallets
//!   list         ▲                         │                (or ListContracts
//!                └──────── back ───────────┘                 if it was the last)
//! ```
//!
//! An address whose `c:`/`w:` callback data would not fit Telegram's limit
//! is keyed by a hash instead (`c#<hex>`, `w#<hex>`) and resolved against the
//! user's current list when pressed.
//!
//! `step` never touches the lock or persistence; the caller runs it inside a
//! [`WatchSession`](super::watchlist::WatchSession) and commits afterwards.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::domain::{UserId, WatchState};

/// Telegram refuses callback data longer than this.
pub const MAX_CALLBACK_DATA: usize = 64;

const ADD: &str = "add";
const LIST: &str = "list";
const BACK: &str = "back";

const CONTRACT_KEY: ItemKey = ItemKey {
    plain: "c:",
    hashed: "c#",
};
const WALLET_KEY: ItemKey = ItemKey {
    plain: "w:",
    hashed: "w#",
};

/// Where a user is in the menu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    MainMenu,
    AwaitContract,
    AwaitWallet {
        contract: String,
    },
    ListContracts,
    ListWallets {
        contract: String,
    },
}

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The `/start` command.
    Start,
    /// Free text typed by the user.
    Text(String),
    /// Callback data of a pressed keyboard button.
    Button(String),
}

/// Inline keyboard button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl Button {
    fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Message text plus keyboard rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

/// Result of one [`step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub next: DialogState,
    pub screen: Screen,
}

/// Apply one user input.
///
/// Inputs that make no sense in the current state leave the state alone and
/// re-render it.
pub fn step(watch: &mut WatchState, user: UserId, current: DialogState, input: Input) -> Turn {
    let next = transition(watch, user, current, input);
    let screen = render(watch, user, &next);
    Turn { next, screen }
}

fn transition(
    watch: &mut WatchState,
    user: UserId,
    current: DialogState,
    input: Input,
) -> DialogState {
    use DialogState as S;

    match (current, input) {
        (_, Input::Start) => S::MainMenu,

        (S::MainMenu, Input::Button(data)) if data == ADD => S::AwaitContract,
        (S::MainMenu, Input::Button(data)) if data == LIST => S::ListContracts,

        (S::AwaitContract | S::AwaitWallet { .. }, Input::Button(data)) if data == BACK => {
            S::MainMenu
        }
        (S::AwaitContract, Input::Text(text)) => match clean(&text) {
            Some(contract) => S::AwaitWallet { contract },
            None => S::AwaitContract,
        },
        (S::AwaitWallet { contract }, Input::Text(text)) => match clean(&text) {
            Some(wallet) => {
                watch.add_wallet(user, &contract, &wallet);
                S::MainMenu
            }
            None => S::AwaitWallet { contract },
        },

        (S::ListContracts, Input::Button(data)) if data == BACK => S::MainMenu,
        (S::ListContracts, Input::Button(data)) => {
            match CONTRACT_KEY.resolve(&data, &watch.list_contracts(user)) {
                Some(contract) => S::ListWallets { contract },
                None => S::ListContracts,
            }
        }

        (S::ListWallets { .. }, Input::Button(data)) if data == BACK => S::ListContracts,
        (S::ListWallets { contract }, Input::Button(data)) => {
            if let Some(wallet) = WALLET_KEY.resolve(&data, &watch.list_wallets(user, &contract)) {
                watch.remove_wallet(user, &contract, &wallet);
            }
            if watch.list_wallets(user, &contract).is_empty() {
                S::ListContracts
            } else {
                S::ListWallets { contract }
            }
        }

        (state, _) => state,
    }
}

/// Screen for a state, reflecting the current watch list.
#[must_use]
pub fn render(watch: &WatchState, user: UserId, state: &DialogState) -> Screen {
    match state {
        DialogState::MainMenu => Screen {
            text: "Ethereum Token Monitor".to_string(),
            keyboard: vec![
                vec![Button::new("Add wallet to monitor", ADD)],
                vec![Button::new("List & remove monitored wallets", LIST)],
            ],
        },
        DialogState::AwaitContract => Screen {
            text: "Enter token contract address".to_string(),
            keyboard: vec![vec![Button::new("Cancel", BACK)]],
        },
        DialogState::AwaitWallet { contract } => Screen {
            text: format!("Contract {contract}\nEnter wallet address"),
            keyboard: vec![vec![Button::new("Cancel", BACK)]],
        },
        DialogState::ListContracts => {
            let contracts = watch.list_contracts(user);
            let text = if contracts.is_empty() {
                "You are not monitoring any contracts yet".to_string()
            } else {
                "You are monitoring these contracts:".to_string()
            };
            list_screen(text, &contracts, &CONTRACT_KEY)
        }
        DialogState::ListWallets { contract } => {
            let wallets = watch.list_wallets(user, contract);
            let text = format!("Contract {contract}\nTap an address to stop monitoring it:");
            list_screen(text, &wallets, &WALLET_KEY)
        }
    }
}

/// One button per item plus a trailing Back row.
fn list_screen(text: String, items: &[String], key: &ItemKey) -> Screen {
    let mut keyboard: Vec<Vec<Button>> = items
        .iter()
        .map(|item| vec![Button::new(item.clone(), key.encode(item))])
        .collect();
    keyboard.push(vec![Button::new("Back", BACK)]);
    Screen { text, keyboard }
}

/// Callback data naming one listed contract or wallet.
struct ItemKey {
    plain: &'static str,
    hashed: &'static str,
}

impl ItemKey {
    fn encode(&self, item: &str) -> String {
        let data = format!("{}{item}", self.plain);
        if data.len() <= MAX_CALLBACK_DATA {
            data
        } else {
            format!("{}{:016x}", self.hashed, digest(item))
        }
    }

    /// The listed item `data` names, or `None` if it is stale or foreign.
    fn resolve(&self, data: &str, items: &[String]) -> Option<String> {
        if let Some(wanted) = data.strip_prefix(self.plain) {
            return items.iter().find(|item| item.as_str() == wanted).cloned();
        }
        let wanted = u64::from_str_radix(data.strip_prefix(self.hashed)?, 16).ok()?;
        items.iter().find(|item| digest(item) == wanted).cloned()
    }
}

fn digest(item: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    item.hash(&mut hasher);
    hasher.finish()
}

fn clean(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
