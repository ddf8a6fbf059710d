//! Telegram notification delivery.
//!
//! Sends each balance event to the chat of the user who watches the wallet.

mod format;

pub mod notifier;

pub use format::format_event_message;
pub use notifier::TelegramNotifier;
