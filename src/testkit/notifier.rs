use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::{BalanceEvent, Event, Notifier};

/// Thread-safe event collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Balance events for one wallet, oldest first.
    pub fn for_wallet(&self, contract: &str, wallet: &str) -> Vec<BalanceEvent> {
        self.events
            .lock()
            .iter()
            .map(|Event::BalanceObserved(e)| e)
            .filter(|e| e.contract == contract && e.wallet == wallet)
            .cloned()
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
