//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for various notification backends.

pub mod queue;
#[cfg(feature = "telegram")]
pub mod telegram;

pub use queue::Delivery;
