//! Telegram notification delivery.
//!
//! Provides the [`TelegramNotifier`] for sending balance notifications. A
//! background worker drains a queue so the reconciliation tick never waits
//! on Telegram.
//!
//! Requires the `telegram` feature to be enabled.

use std::time::Duration;

use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::adapter::outbound::notifier::queue::{spawn_paced, Delivery};
use crate::port::{Event, Notifier};

use super::format::format_event_message;

/// Gap between consecutive messages, keeping under Telegram's global limit
/// of about 30 messages per second.
pub const SEND_INTERVAL: Duration = Duration::from_millis(34);

/// Telegram notifier that messages each event's user.
///
/// Implements the [`Notifier`] trait; a background task does the sending.
pub struct TelegramNotifier {
    /// Channel sender for queuing outbound notifications.
    sender: mpsc::UnboundedSender<Event>,
}

impl TelegramNotifier {
    /// Create a notifier and spawn its delivery task.
    ///
    /// The returned [`Delivery`] resolves once the notifier is dropped and
    /// its queue is empty. Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(bot: Bot) -> (Self, Delivery) {
        let (sender, receiver) = mpsc::unbounded_channel();
        info!("Telegram notifier started");

        let delivery = spawn_paced(receiver, SEND_INTERVAL, move |event: Event| {
            let bot = bot.clone();
            async move { send_event(&bot, event).await }
        });

        (Self { sender }, delivery)
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: Event) {
        if self.sender.send(event).is_err() {
            warn!("Telegram notifier channel closed");
        }
    }
}

async fn send_event(bot: &Bot, event: Event) {
    let chat_id = ChatId(event.user().get());
    let text = format_event_message(&event);

    if let Err(e) = bot.send_message(chat_id, text).await {
        error!(chat_id = chat_id.0, error = %e, "Failed to send Telegram message");
    }
}
