//! Queued delivery for chat notifiers.
//!
//! A notifier pushes into an unbounded channel and returns at once; a
//! background task hands queued items to the sender one at a time, starting
//! consecutive sends at least a fixed interval apart.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Background delivery task of a queued notifier.
#[derive(Debug)]
pub struct Delivery {
    task: JoinHandle<()>,
}

impl Delivery {
    /// Wait until the queue has closed and every queued item was sent.
    ///
    /// The queue closes when its last sending half is dropped, so drop the
    /// notifier and everything holding it first.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            warn!(error = %e, "Notification delivery task failed");
        }
    }
}

/// Spawn the delivery task for `receiver`.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_paced<T, S, Fut>(
    mut receiver: mpsc::UnboundedReceiver<T>,
    pace: Duration,
    mut send: S,
) -> Delivery
where
    T: Send + 'static,
    S: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut next = Instant::now();
        while let Some(item) = receiver.recv().await {
            sleep_until(next).await;
            next = Instant::now() + pace;
            send(item).await;
        }
        debug!("Notification queue closed");
    });
    Delivery { task }
}
