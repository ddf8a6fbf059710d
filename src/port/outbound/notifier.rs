//! Notifier port for balance notifications.
//!
//! This module defines the trait for telling users about balance events
//! found by the reconciliation job.

use crate::domain::{BalanceChange, UserId};

/// Events that can trigger notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A watched wallet got its first balance or its balance moved.
    BalanceObserved(BalanceEvent),
}

/// Balance observation for one watched wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEvent {
    /// Subscriber to notify.
    pub user: UserId,
    /// Token contract address.
    pub contract: String,
    /// Wallet address.
    pub wallet: String,
    /// Baseline or change with delta.
    pub change: BalanceChange,
}

impl Event {
    /// The user this event should be delivered to.
    #[must_use]
    pub const fn user(&self) -> UserId {
        match self {
            Self::BalanceObserved(e) => e.user,
        }
    }
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget: delivery ordering, rate control, and
/// failures are the implementation's concern.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method must not block; queue slow work instead
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }
}

/// A no-op notifier for when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::info;
        match event {
            Event::BalanceObserved(e) => match e.change {
                BalanceChange::Initial { amount } => {
                    info!(
                        user = %e.user,
                        contract = %e.contract,
                        wallet = %e.wallet,
                        amount = %amount,
                        "Baseline recorded"
                    );
                }
                BalanceChange::Changed { amount, delta } => {
                    info!(
                        user = %e.user,
                        contract = %e.contract,
                        wallet = %e.wallet,
                        amount = %amount,
                        delta = %delta,
                        "Balance changed"
                    );
                }
            },
        }
    }
}
