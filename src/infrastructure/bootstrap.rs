//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::etherscan::EtherscanClient;
use crate::adapter::outbound::file::JsonFileStore;
use crate::adapter::outbound::notifier::Delivery;
use crate::application::WatchList;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{BalanceSource, LogNotifier, NotifierRegistry};

/// Open the watch list backed by the configured state file.
///
/// Never fails: an unreadable file means an empty watch list.
#[must_use]
pub fn open_watch_list(config: &Config) -> Arc<WatchList> {
    let store = JsonFileStore::new(&config.storage.path);
    info!(path = %store.path().display(), "Opening watch list");
    Arc::new(WatchList::open(Arc::new(store)))
}

/// Build the balance source from configuration.
///
/// # Errors
///
/// Returns an error if `ETHERSCAN_API_KEY` is unset or the HTTP client
/// cannot be built.
pub fn build_balance_source(config: &Config) -> Result<Arc<dyn BalanceSource>> {
    config.require_api_key()?;
    let client = EtherscanClient::from_config(&config.etherscan)?;
    Ok(Arc::new(client))
}

/// Build notifier registry, delivering through `bot` when given.
///
/// The [`Delivery`] is returned when a queued notifier was registered.
#[cfg(feature = "telegram")]
pub(crate) fn build_notifier_registry(
    bot: Option<teloxide::Bot>,
) -> (NotifierRegistry, Option<Delivery>) {
    use crate::adapter::outbound::notifier::telegram::TelegramNotifier;

    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    let delivery = bot.map(|bot| {
        let (notifier, delivery) = TelegramNotifier::spawn(bot);
        registry.register(Box::new(notifier));
        info!("Telegram notifier enabled");
        delivery
    });

    (registry, delivery)
}

/// Build notifier registry (non-telegram variant).
#[cfg(not(feature = "telegram"))]
pub(crate) fn build_notifier_registry() -> (NotifierRegistry, Option<Delivery>) {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    (registry, None)
}
