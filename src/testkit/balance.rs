//! Scripted [`BalanceSource`] for reconciliation tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::{Notify, Semaphore};

use crate::error::FetchError;
use crate::port::BalanceSource;

/// Holds fetches until the test releases them.
#[derive(Debug)]
pub struct Gate {
    entered: Notify,
    release: Semaphore,
}

impl Gate {
    fn new() -> Self {
        Self {
            entered: Notify::new(),
            release: Semaphore::new(0),
        }
    }

    /// Resolves once a fetch is waiting at the gate.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let waiting and future fetches through.
    pub fn open(&self) {
        self.release.add_permits(1024);
    }
}

/// Balance source answering from a fixed table.
///
/// Pairs without an entry fail with [`FetchError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedBalances {
    balances: Mutex<HashMap<(String, String), Result<Decimal, FetchError>>>,
    calls: AtomicUsize,
    gate: Option<Gate>,
}

impl ScriptedBalances {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose fetches wait at a [`Gate`].
    pub fn gated() -> Self {
        Self {
            gate: Some(Gate::new()),
            ..Self::default()
        }
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }

    /// Answer `amount` for this pair from now on.
    pub fn set(&self, contract: &str, wallet: &str, amount: Decimal) {
        self.balances
            .lock()
            .insert((contract.to_string(), wallet.to_string()), Ok(amount));
    }

    /// Fail lookups for this pair from now on.
    pub fn fail(&self, contract: &str, wallet: &str) {
        self.balances.lock().insert(
            (contract.to_string(), wallet.to_string()),
            Err(FetchError::unavailable("scripted failure")),
        );
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BalanceSource for ScriptedBalances {
    async fn balance(&self, contract: &str, wallet: &str) -> Result<Decimal, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            let _permit = gate.release.acquire().await;
        }

        let key = (contract.to_string(), wallet.to_string());
        self.balances
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::unavailable("no scripted balance")))
    }
}
