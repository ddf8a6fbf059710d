mod support;

use rust_decimal_macros::dec;
use tokenwatch::domain::BalanceChange;
use tokenwatch::port::StatePersistence;

use support::{reconciler, StateDir, ALICE, BOB};

#[tokio::test]
async fn first_observation_sets_baseline_and_notifies_amount_only() {
    let dir = StateDir::new();
    let watch = dir.open();
    watch.add_wallet(ALICE, "0xc", "0xw").await;

    let (reconciler, source, notifier) = reconciler(&watch);
    source.set("0xc", "0xw", dec!(100));

    let report = reconciler.tick().await;
    assert_eq!(report.checked, 1);
    assert_eq!(report.notified, 1);
    assert!(report.commit.is_ok());

    let events = notifier.for_wallet("0xc", "0xw");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].user, ALICE);
    assert_eq!(events[0].change, BalanceChange::Initial { amount: dec!(100) });

    let persisted = dir.store().load().unwrap();
    assert_eq!(persisted.last_amount(ALICE, "0xc", "0xw"), Some(Some(dec!(100))));
}

#[tokio::test]
async fn change_notifies_new_amount_and_delta() {
    let dir = StateDir::new();
    let watch = dir.open();
    watch.add_wallet(ALICE, "0xc", "0xw").await;

    let (reconciler, source, notifier) = reconciler(&watch);
    source.set("0xc", "0xw", dec!(100));
    reconciler.tick().await;

    source.set("0xc", "0xw", dec!(150));
    reconciler.tick().await;

    let events = notifier.for_wallet("0xc", "0xw");
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[1].change,
        BalanceChange::Changed {
            amount: dec!(150),
            delta: dec!(50)
        }
    );

    source.set("0xc", "0xw", dec!(120.5));
    reconciler.tick().await;
    assert_eq!(notifier.for_wallet("0xc", "0xw")[2].change.delta(), Some(dec!(-29.5)));
}

#[tokio::test]
async fn unchanged_balance_is_silent() {
    let dir = StateDir::new();
    let watch = dir.open();
    watch.add_wallet(ALICE, "0xc", "0xw").await;

    let (reconciler, source, notifier) = reconciler(&watch);
    source.set("0xc", "0xw", dec!(100));
    reconciler.tick().await;

    // Same value with a different scale.
    source.set("0xc", "0xw", dec!(100.000));
    let report = reconciler.tick().await;

    assert_eq!(report.notified, 0);
    assert_eq!(notifier.len(), 1);
}

#[tokio::test]
async fn failed_lookup_leaves_entry_and_others_proceed() {
    let dir = StateDir::new();
    let watch = dir.open();
    watch.add_wallet(ALICE, "0xc", "0xa").await;
    watch.add_wallet(ALICE, "0xc", "0xb").await;
    watch.add_wallet(BOB, "0xd", "0xa").await;

    let (reconciler, source, notifier) = reconciler(&watch);
    source.set("0xc", "0xa", dec!(1));
    source.set("0xc", "0xb", dec!(2));
    source.set("0xd", "0xa", dec!(3));
    reconciler.tick().await;

    source.fail("0xc", "0xb");
    source.set("0xc", "0xa", dec!(10));
    source.set("0xd", "0xa", dec!(30));
    let report = reconciler.tick().await;

    assert_eq!(report.checked, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.notified, 2);
    assert_eq!(notifier.for_wallet("0xc", "0xb").len(), 1);

    let persisted = dir.store().load().unwrap();
    assert_eq!(persisted.last_amount(ALICE, "0xc", "0xb"), Some(Some(dec!(2))));
    assert_eq!(persisted.last_amount(ALICE, "0xc", "0xa"), Some(Some(dec!(10))));
    assert_eq!(persisted.last_amount(BOB, "0xd", "0xa"), Some(Some(dec!(30))));
}

#[tokio::test]
async fn failed_first_lookup_keeps_wallet_pending() {
    let dir = StateDir::new();
    let watch = dir.open();
    watch.add_wallet(ALICE, "0xc", "0xw").await;

    let (reconciler, source, notifier) = reconciler(&watch);
    source.fail("0xc", "0xw");
    reconciler.tick().await;

    assert!(notifier.is_empty());
    let persisted = dir.store().load().unwrap();
    assert_eq!(persisted.last_amount(ALICE, "0xc", "0xw"), Some(None));

    // The first successful lookup still counts as the initial observation.
    source.set("0xc", "0xw", dec!(7));
    reconciler.tick().await;
    assert_eq!(
        notifier.for_wallet("0xc", "0xw")[0].change,
        BalanceChange::Initial { amount: dec!(7) }
    );
}

#[tokio::test]
async fn baseline_survives_restart() {
    let dir = StateDir::new();
    {
        let watch = dir.open();
        watch.add_wallet(ALICE, "0xc", "0xw").await;
        let (reconciler, source, _) = reconciler(&watch);
        source.set("0xc", "0xw", dec!(100));
        reconciler.tick().await;
    }

    let watch = dir.open();
    let (reconciler, source, notifier) = reconciler(&watch);
    source.set("0xc", "0xw", dec!(100));
    reconciler.tick().await;
    assert!(notifier.is_empty());

    source.set("0xc", "0xw", dec!(90));
    reconciler.tick().await;
    assert_eq!(
        notifier.for_wallet("0xc", "0xw")[0].change,
        BalanceChange::Changed {
            amount: dec!(90),
            delta: dec!(-10)
        }
    );
}

#[tokio::test]
async fn empty_watch_list_still_commits() {
    let dir = StateDir::new();
    let watch = dir.open();
    let (reconciler, source, notifier) = reconciler(&watch);

    let report = reconciler.tick().await;

    assert_eq!(report.checked, 0);
    assert_eq!(source.calls(), 0);
    assert!(notifier.is_empty());
    assert!(dir.path().exists());
}
