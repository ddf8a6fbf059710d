//! The watch list: which wallets each user follows under which token contract.
//!
//! [`WatchState`] is a three-level mapping
//! `user -> contract -> wallet -> last observed amount`. A wallet that has
//! just been registered has no baseline (`None`) until the next successful
//! reconciliation tick.
//!
//! Contract keys never map to an empty wallet set: removing the last wallet
//! under a contract removes the contract as well.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opaque subscriber identifier (the Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Last observed amount for one wallet; `None` until a baseline exists.
pub type LastAmount = Option<Decimal>;

/// Wallets watched under one contract.
pub type WalletMap = BTreeMap<String, LastAmount>;

/// Contracts watched by one user.
pub type ContractMap = BTreeMap<String, WalletMap>;

/// Outcome of [`WatchState::remove_wallet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Nothing was registered under that key.
    Absent,
    /// The wallet was removed; other wallets remain under the contract.
    Removed,
    /// The wallet was the last one, so the contract entry was dropped too.
    ContractDropped,
}

/// One row of the watch list, borrowed from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchEntry<'a> {
    pub user: UserId,
    pub contract: &'a str,
    pub wallet: &'a str,
    pub last: LastAmount,
}

/// Every watched wallet for every user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchState {
    users: BTreeMap<UserId, ContractMap>,
}

impl WatchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wallet under a contract for a user.
    ///
    /// Registering an existing wallet again is a no-op and keeps its baseline.
    /// Returns `true` if the wallet was newly added.
    pub fn add_wallet(&mut self, user: UserId, contract: &str, wallet: &str) -> bool {
        let wallets = self
            .users
            .entry(user)
            .or_default()
            .entry(contract.to_string())
            .or_default();

        if wallets.contains_key(wallet) {
            return false;
        }
        wallets.insert(wallet.to_string(), None);
        true
    }

    /// Stop watching a wallet, dropping the contract if it becomes empty.
    pub fn remove_wallet(&mut self, user: UserId, contract: &str, wallet: &str) -> Removal {
        let Some(contracts) = self.users.get_mut(&user) else {
            return Removal::Absent;
        };
        let Some(wallets) = contracts.get_mut(contract) else {
            return Removal::Absent;
        };
        if wallets.remove(wallet).is_none() {
            return Removal::Absent;
        }
        if !wallets.is_empty() {
            return Removal::Removed;
        }

        contracts.remove(contract);
        if contracts.is_empty() {
            self.users.remove(&user);
        }
        Removal::ContractDropped
    }

    /// Contracts the user watches, in key order.
    #[must_use]
    pub fn list_contracts(&self, user: UserId) -> Vec<String> {
        self.users
            .get(&user)
            .map(|contracts| contracts.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Wallets the user watches under a contract, in key order.
    #[must_use]
    pub fn list_wallets(&self, user: UserId, contract: &str) -> Vec<String> {
        self.users
            .get(&user)
            .and_then(|contracts| contracts.get(contract))
            .map(|wallets| wallets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Last observed amount, if the wallet is watched.
    #[must_use]
    pub fn last_amount(&self, user: UserId, contract: &str, wallet: &str) -> Option<LastAmount> {
        self.users
            .get(&user)?
            .get(contract)?
            .get(wallet)
            .copied()
    }

    /// Replace the stored amount of an already watched wallet.
    ///
    /// Returns `false` (and changes nothing) if the wallet is not watched.
    pub fn set_amount(
        &mut self,
        user: UserId,
        contract: &str,
        wallet: &str,
        amount: Decimal,
    ) -> bool {
        let slot = self
            .users
            .get_mut(&user)
            .and_then(|contracts| contracts.get_mut(contract))
            .and_then(|wallets| wallets.get_mut(wallet));

        match slot {
            Some(slot) => {
                *slot = Some(amount);
                true
            }
            None => false,
        }
    }

    /// Iterate every `(user, contract, wallet, last)` row.
    pub fn entries(&self) -> impl Iterator<Item = WatchEntry<'_>> {
        self.users.iter().flat_map(|(user, contracts)| {
            contracts.iter().flat_map(move |(contract, wallets)| {
                wallets.iter().map(move |(wallet, last)| WatchEntry {
                    user: *user,
                    contract,
                    wallet,
                    last: *last,
                })
            })
        })
    }

    /// Users with at least one watched wallet.
    pub fn users(&self) -> impl Iterator<Item = UserId> + '_ {
        self.users.keys().copied()
    }

    /// Total number of watched wallets across all users.
    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.users
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// True if some contract maps to an empty wallet set.
    ///
    /// Never true for a state built through this API; persisted files are
    /// checked with it after loading.
    #[must_use]
    pub fn has_empty_contract(&self) -> bool {
        self.users
            .values()
            .flat_map(BTreeMap::values)
            .any(BTreeMap::is_empty)
    }

    /// Drop empty contract and user entries.
    pub fn prune_empty(&mut self) {
        for contracts in self.users.values_mut() {
            contracts.retain(|_, wallets| !wallets.is_empty());
        }
        self.users.retain(|_, contracts| !contracts.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const USER: UserId = UserId(42);

    #[test]
    fn add_wallet_creates_nested_entries_without_baseline() {
        let mut state = WatchState::new();
        assert!(state.add_wallet(USER, "0xc", "0xw"));

        assert_eq!(state.list_contracts(USER), vec!["0xc"]);
        assert_eq!(state.list_wallets(USER, "0xc"), vec!["0xw"]);
        assert_eq!(state.last_amount(USER, "0xc", "0xw"), Some(None));
    }

    #[test]
    fn add_wallet_twice_is_idempotent() {
        let mut once = WatchState::new();
        once.add_wallet(USER, "0xc", "0xw");

        let mut twice = WatchState::new();
        twice.add_wallet(USER, "0xc", "0xw");
        assert!(!twice.add_wallet(USER, "0xc", "0xw"));

        assert_eq!(once, twice);
    }

    #[test]
    fn add_wallet_keeps_existing_baseline() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xw");
        state.set_amount(USER, "0xc", "0xw", dec!(100));

        state.add_wallet(USER, "0xc", "0xw");
        assert_eq!(state.last_amount(USER, "0xc", "0xw"), Some(Some(dec!(100))));
    }

    #[test]
    fn remove_last_wallet_drops_contract() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xw");
        state.add_wallet(USER, "0xd", "0xw");

        assert_eq!(state.remove_wallet(USER, "0xc", "0xw"), Removal::ContractDropped);
        assert_eq!(state.list_contracts(USER), vec!["0xd"]);
        assert!(!state.has_empty_contract());
    }

    #[test]
    fn remove_non_last_wallet_keeps_siblings() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xa");
        state.add_wallet(USER, "0xc", "0xb");
        state.set_amount(USER, "0xc", "0xb", dec!(7));

        assert_eq!(state.remove_wallet(USER, "0xc", "0xa"), Removal::Removed);
        assert_eq!(state.list_wallets(USER, "0xc"), vec!["0xb"]);
        assert_eq!(state.last_amount(USER, "0xc", "0xb"), Some(Some(dec!(7))));
    }

    #[test]
    fn remove_absent_wallet_is_noop() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xa");
        let before = state.clone();

        assert_eq!(state.remove_wallet(USER, "0xc", "0xmissing"), Removal::Absent);
        assert_eq!(state.remove_wallet(USER, "0xmissing", "0xa"), Removal::Absent);
        assert_eq!(state.remove_wallet(UserId(7), "0xc", "0xa"), Removal::Absent);
        assert_eq!(state, before);
    }

    #[test]
    fn removing_everything_leaves_empty_state() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xa");
        state.remove_wallet(USER, "0xc", "0xa");

        assert!(state.is_empty());
        assert!(state.list_contracts(USER).is_empty());
    }

    #[test]
    fn set_amount_ignores_unknown_wallet() {
        let mut state = WatchState::new();
        assert!(!state.set_amount(USER, "0xc", "0xw", dec!(1)));
        assert!(state.is_empty());
    }

    #[test]
    fn entries_visit_every_wallet() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xa");
        state.add_wallet(USER, "0xc", "0xb");
        state.add_wallet(UserId(7), "0xd", "0xa");

        let rows: Vec<_> = state
            .entries()
            .map(|e| (e.user, e.contract.to_string(), e.wallet.to_string()))
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(state.watched_count(), 3);
        assert!(rows.contains(&(UserId(7), "0xd".to_string(), "0xa".to_string())));
    }

    #[test]
    fn users_are_isolated() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xa");

        assert!(state.list_contracts(UserId(7)).is_empty());
        assert!(state.list_wallets(UserId(7), "0xc").is_empty());
    }

    #[test]
    fn json_keeps_null_baseline_and_precision() {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xnew");
        state.add_wallet(USER, "0xc", "0xold");
        state.set_amount(USER, "0xc", "0xold", dec!(123456789012345678901234567.8));

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"0xnew\":null"));
        assert!(json.contains("\"123456789012345678901234567.8\""));

        let back: WatchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn prune_empty_drops_hollow_entries() {
        let mut state: WatchState =
            serde_json::from_str(r#"{"42": {"0xc": {}, "0xd": {"0xw": null}}, "7": {}}"#).unwrap();
        assert!(state.has_empty_contract());

        state.prune_empty();
        assert!(!state.has_empty_contract());
        assert_eq!(state.list_contracts(USER), vec!["0xd"]);
        assert_eq!(state.users().count(), 1);
    }
}
