//! Periodic balance reconciliation.
//!
//! A tick walks every watched wallet, fetches its current balance, stores it,
//! and emits an [`Event::BalanceObserved`] for first observations and changes.
//! The whole tick, including the final commit, runs inside one
//! [`WatchSession`](super::watchlist::WatchSession), so conversation turns
//! wait until it is done.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::{BalanceChange, LastAmount, UserId};
use crate::error::StoreError;
use crate::port::{BalanceEvent, BalanceSource, Event, Notifier};

use super::watchlist::WatchList;

/// Outcome of one tick.
#[derive(Debug)]
pub struct TickReport {
    /// Wallets looked up.
    pub checked: usize,
    /// Lookups that failed and were skipped.
    pub failed: usize,
    /// Notifications emitted.
    pub notified: usize,
    /// Result of the commit that closes the tick.
    pub commit: Result<(), StoreError>,
}

/// Runs reconciliation ticks against a shared [`WatchList`].
pub struct Reconciler {
    watch: Arc<WatchList>,
    source: Arc<dyn BalanceSource>,
    notifier: Arc<dyn Notifier>,
}

impl Reconciler {
    #[must_use]
    pub fn new(
        watch: Arc<WatchList>,
        source: Arc<dyn BalanceSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            watch,
            source,
            notifier,
        }
    }

    /// Run one full reconciliation pass.
    ///
    /// Holds the watch-list lock from the first read until the commit has
    /// finished. A failed lookup leaves that wallet untouched and never stops
    /// the pass.
    pub async fn tick(&self) -> TickReport {
        let mut session = self.watch.session().await;

        let rows: Vec<(UserId, String, String, LastAmount)> = session
            .entries()
            .map(|e| (e.user, e.contract.to_string(), e.wallet.to_string(), e.last))
            .collect();

        let mut failed = 0;
        let mut notified = 0;

        for (user, contract, wallet, last) in &rows {
            let fetched = match self.source.balance(contract, wallet).await {
                Ok(amount) => amount,
                Err(e) => {
                    failed += 1;
                    debug!(
                        user = %user,
                        contract = %contract,
                        wallet = %wallet,
                        error = %e,
                        "Balance unavailable, skipping wallet"
                    );
                    continue;
                }
            };

            let amount = fetched.normalize();
            session.set_amount(*user, contract, wallet, amount);

            if let Some(change) = BalanceChange::classify(*last, amount) {
                self.notifier.notify(Event::BalanceObserved(BalanceEvent {
                    user: *user,
                    contract: contract.clone(),
                    wallet: wallet.clone(),
                    change,
                }));
                notified += 1;
            }
        }

        let commit = session.commit();
        drop(session);

        info!(
            checked = rows.len(),
            failed,
            notified,
            committed = commit.is_ok(),
            "Reconciliation tick finished"
        );

        TickReport {
            checked: rows.len(),
            failed,
            notified,
            commit,
        }
    }

    /// Tick every `every`, starting one period from now, until dropped.
    ///
    /// A tick that overruns the period delays the next one instead of
    /// triggering a burst.
    pub async fn run(&self, every: Duration) {
        info!(interval_secs = every.as_secs(), "Reconciliation scheduled");

        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WatchState;
    use crate::testkit::balance::ScriptedBalances;
    use crate::testkit::notifier::RecordingNotifier;
    use crate::testkit::persistence::SpyPersistence;
    use rust_decimal_macros::dec;

    const USER: UserId = UserId(42);

    struct Fixture {
        watch: Arc<WatchList>,
        source: Arc<ScriptedBalances>,
        notifier: RecordingNotifier,
        spy: Arc<SpyPersistence>,
        reconciler: Reconciler,
    }

    fn fixture(state: WatchState) -> Fixture {
        let spy = Arc::new(SpyPersistence::new());
        let watch = Arc::new(WatchList::with_state(state, spy.clone()));
        let source = Arc::new(ScriptedBalances::new());
        let notifier = RecordingNotifier::new();
        let reconciler = Reconciler::new(
            Arc::clone(&watch),
            source.clone(),
            Arc::new(notifier.clone()),
        );
        Fixture {
            watch,
            source,
            notifier,
            spy,
            reconciler,
        }
    }

    fn watching(amount: Option<rust_decimal::Decimal>) -> WatchState {
        let mut state = WatchState::new();
        state.add_wallet(USER, "0xc", "0xw");
        if let Some(amount) = amount {
            state.set_amount(USER, "0xc", "0xw", amount);
        }
        state
    }

    #[tokio::test]
    async fn first_observation_records_baseline_and_notifies_without_delta() {
        let f = fixture(watching(None));
        f.source.set("0xc", "0xw", dec!(100));

        let report = f.reconciler.tick().await;

        assert_eq!(report.notified, 1);
        let events = f.notifier.for_wallet("0xc", "0xw");
        assert_eq!(events[0].change, BalanceChange::Initial { amount: dec!(100) });
        assert_eq!(events[0].user, USER);
        assert_eq!(
            f.watch.snapshot().await.last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(100)))
        );
    }

    #[tokio::test]
    async fn changed_balance_notifies_amount_and_delta() {
        let f = fixture(watching(Some(dec!(100))));
        f.source.set("0xc", "0xw", dec!(150));

        f.reconciler.tick().await;

        let events = f.notifier.for_wallet("0xc", "0xw");
        assert_eq!(
            events,
            vec![BalanceEvent {
                user: USER,
                contract: "0xc".into(),
                wallet: "0xw".into(),
                change: BalanceChange::Changed {
                    amount: dec!(150),
                    delta: dec!(50),
                },
            }]
        );
        assert_eq!(
            f.watch.snapshot().await.last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(150)))
        );
    }

    #[tokio::test]
    async fn unchanged_balance_is_silent() {
        let f = fixture(watching(Some(dec!(100))));
        f.source.set("0xc", "0xw", dec!(100));

        let report = f.reconciler.tick().await;

        assert_eq!(report.notified, 0);
        assert!(f.notifier.is_empty());
        assert_eq!(
            f.watch.snapshot().await.last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(100)))
        );
    }

    #[tokio::test]
    async fn failed_lookup_keeps_amount_and_is_silent() {
        let f = fixture(watching(Some(dec!(100))));
        f.source.fail("0xc", "0xw");

        let report = f.reconciler.tick().await;

        assert_eq!(report.failed, 1);
        assert!(f.notifier.is_empty());
        assert_eq!(
            f.watch.snapshot().await.last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(100)))
        );
    }

    #[tokio::test]
    async fn delta_overflow_reports_new_baseline_and_commits() {
        let f = fixture(watching(Some(rust_decimal::Decimal::MAX)));
        f.source.set("0xc", "0xw", dec!(-1));

        let report = f.reconciler.tick().await;

        assert!(report.commit.is_ok());
        assert_eq!(
            f.notifier.for_wallet("0xc", "0xw")[0].change,
            BalanceChange::Initial { amount: dec!(-1) }
        );
        assert_eq!(
            f.spy.last_saved().unwrap().last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(-1)))
        );
    }

    #[tokio::test]
    async fn tick_commits_exactly_once() {
        let mut state = watching(None);
        state.add_wallet(USER, "0xc", "0xv");
        state.add_wallet(UserId(7), "0xd", "0xw");
        let f = fixture(state);

        let report = f.reconciler.tick().await;

        assert_eq!(report.checked, 3);
        assert!(report.commit.is_ok());
        assert_eq!(f.spy.save_count(), 1);
        assert_eq!(f.source.calls(), 3);
    }

    #[tokio::test]
    async fn empty_watch_list_still_commits() {
        let f = fixture(WatchState::new());

        let report = f.reconciler.tick().await;

        assert_eq!(report.checked, 0);
        assert_eq!(f.spy.save_count(), 1);
    }

    #[tokio::test]
    async fn commit_failure_is_reported_not_raised() {
        let spy = Arc::new(SpyPersistence::failing_save());
        let watch = Arc::new(WatchList::with_state(watching(None), spy));
        let source = Arc::new(ScriptedBalances::new());
        source.set("0xc", "0xw", dec!(3));
        let notifier = RecordingNotifier::new();
        let reconciler = Reconciler::new(
            Arc::clone(&watch),
            source,
            Arc::new(notifier.clone()),
        );

        let report = reconciler.tick().await;

        assert!(report.commit.is_err());
        assert_eq!(notifier.len(), 1);
        assert_eq!(
            watch.snapshot().await.last_amount(USER, "0xc", "0xw"),
            Some(Some(dec!(3)))
        );
    }

    #[tokio::test]
    async fn stored_amount_is_normalized() {
        let f = fixture(watching(None));
        f.source.set("0xc", "0xw", dec!(12.3400));

        f.reconciler.tick().await;

        let saved = f.spy.last_saved().unwrap();
        let stored = saved.last_amount(USER, "0xc", "0xw").unwrap().unwrap();
        assert_eq!(stored.to_string(), "12.34");
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_once_per_interval() {
        let f = fixture(watching(None));
        f.source.set("0xc", "0xw", dec!(1));
        let reconciler = Arc::new(f.reconciler);

        let runner = {
            let reconciler = Arc::clone(&reconciler);
            tokio::spawn(async move { reconciler.run(Duration::from_secs(300)).await })
        };

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(f.spy.save_count(), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(f.spy.save_count(), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(f.spy.save_count(), 2);

        runner.abort();
    }
}
