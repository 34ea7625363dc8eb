//! Debounced regeneration queue.
//!
//! A single pending slot: every request overwrites whatever has not run yet,
//! and the consumer only wakes once no new request has arrived for the
//! debounce delay. Intermediate values are never observed, and the value
//! handed out is always the most recent one.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Default quiet period before a queued request runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Create a connected request handle and debounced receiver.
pub fn debounced<T>(delay: Duration) -> (RegenerationQueue<T>, PendingRequest<T>) {
    let (tx, rx) = watch::channel(None);
    (
        RegenerationQueue { tx: Arc::new(tx) },
        PendingRequest { rx, delay },
    )
}

/// Producer side. Cheap to clone and usable from non-async threads.
pub struct RegenerationQueue<T> {
    tx: Arc<watch::Sender<Option<T>>>,
}

impl<T> Clone for RegenerationQueue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> RegenerationQueue<T> {
    /// Replace the pending request.
    pub fn request(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// True once the receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side.
pub struct PendingRequest<T> {
    rx: watch::Receiver<Option<T>>,
    delay: Duration,
}

impl<T: Clone> PendingRequest<T> {
    /// Wait for the next settled request.
    ///
    /// Returns `None` once every producer is gone and nothing is pending.
    /// A request still pending when the last producer drops is delivered
    /// without waiting out the delay.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.delay) => break,
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.rx.borrow_and_update().clone()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
