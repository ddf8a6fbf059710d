//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the balance API,
//! watch-list storage, and user notifications.

pub mod balance;
pub mod notifier;
pub mod persistence;
