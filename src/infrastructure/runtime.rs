//! Process lifecycle: the long-running bot and one-shot maintenance passes.

use std::sync::Arc;

use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::bootstrap::{build_balance_source, build_notifier_registry, open_watch_list};
use crate::adapter::outbound::file::{JsonFileStore, MemoryStore};
use crate::adapter::outbound::notifier::Delivery;
use crate::application::{Reconciler, TickReport, WatchList};
use crate::domain::WatchState;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::StatePersistence;

/// Run the bot: serve conversations and reconcile on schedule until Ctrl-C.
///
/// # Errors
///
/// Returns an error if a required secret is missing or the balance client
/// cannot be built.
#[cfg(feature = "telegram")]
pub async fn run(config: Config) -> Result<()> {
    use crate::adapter::inbound::telegram::run_frontend;
    use crate::application::Dialogs;

    let bot = teloxide::Bot::new(config.require_bot_token()?);
    let source = build_balance_source(&config)?;
    let watch = open_watch_list(&config);

    let (registry, delivery) = build_notifier_registry(Some(bot.clone()));
    let reconciler = Reconciler::new(Arc::clone(&watch), source, Arc::new(registry));
    let every = config.reconcile.interval();
    let schedule = tokio::spawn(async move { reconciler.run(every).await });

    let dialogs = Arc::new(Dialogs::new(Arc::clone(&watch)));

    // A turn commits before its first await after taking the lock, so
    // dropping the dispatcher here never loses a mutation.
    tokio::select! {
        () = run_frontend(bot, dialogs) => {}
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
    }

    stop_schedule(&watch, schedule).await;
    drain(delivery).await;
    info!("tokenwatch stopped");
    Ok(())
}

/// Run the reconciliation schedule without a chat front end.
///
/// # Errors
///
/// Returns an error if the balance client cannot be built.
#[cfg(not(feature = "telegram"))]
pub async fn run(config: Config) -> Result<()> {
    let source = build_balance_source(&config)?;
    let watch = open_watch_list(&config);
    let (registry, delivery) = build_notifier_registry();
    let reconciler = Reconciler::new(Arc::clone(&watch), source, Arc::new(registry));
    let every = config.reconcile.interval();
    let schedule = tokio::spawn(async move { reconciler.run(every).await });

    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");

    stop_schedule(&watch, schedule).await;
    drain(delivery).await;
    info!("tokenwatch stopped");
    Ok(())
}

/// Cancel the reconciliation schedule between ticks.
///
/// Takes the watch-list lock first, so a tick that has started finishes and
/// commits before the task is cancelled.
pub(crate) async fn stop_schedule(watch: &WatchList, schedule: JoinHandle<()>) {
    let _idle = watch.session().await;
    schedule.abort();
    match schedule.await {
        Err(e) if e.is_panic() => warn!(error = %e, "Reconciliation task panicked"),
        _ => {}
    }
}

/// Wait for queued notifications to go out.
async fn drain(delivery: Option<Delivery>) {
    if let Some(delivery) = delivery {
        info!("Waiting for queued notifications");
        delivery.finished().await;
    }
}

/// Run a single reconciliation pass and return its report.
///
/// With `dry_run`, the persisted state is read but never written, and
/// notifications are only logged. Otherwise this returns only after every
/// notification of the pass has been sent.
///
/// # Errors
///
/// Returns an error if the balance client cannot be built.
pub async fn tick_once(config: &Config, dry_run: bool) -> Result<TickReport> {
    let source = build_balance_source(config)?;

    let watch = if dry_run {
        let state = load_state(config);
        Arc::new(WatchList::with_state(
            state.clone(),
            Arc::new(MemoryStore::new(state)),
        ))
    } else {
        open_watch_list(config)
    };

    #[cfg(feature = "telegram")]
    let (registry, delivery) = {
        let bot = if dry_run {
            None
        } else {
            config.telegram.bot_token.as_deref().map(teloxide::Bot::new)
        };
        build_notifier_registry(bot)
    };
    #[cfg(not(feature = "telegram"))]
    let (registry, delivery) = build_notifier_registry();

    let reconciler = Reconciler::new(watch, source, Arc::new(registry));
    let report = reconciler.tick().await;

    // Closes the notification queue.
    drop(reconciler);
    drain(delivery).await;

    Ok(report)
}

/// Read the persisted state as-is, logging (not failing on) load errors.
#[must_use]
pub fn load_state(config: &Config) -> WatchState {
    match JsonFileStore::new(&config.storage.path).load() {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, "Failed to read state file");
            WatchState::new()
        }
    }
}
