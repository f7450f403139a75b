//! # Live Subscriptions
//!
//! A [`Subscription`] is the receiving half of a live query. It always holds the most recent
//! snapshot of the documents matching its filter. The collection pushes a new snapshot after
//! every change to a document the filter matched before or after the change; intermediate snapshots a slow reader missed are skipped.
//!
//! Holding the handle keeps the subscription alive. Dropping it, or calling
//! [`Subscription::unsubscribe`], releases it.

use crate::error::FrameworkError;
use tokio::sync::watch;

#[derive(Debug)]
pub struct Subscription<T> {
    receiver: watch::Receiver<Vec<T>>,
}

impl<T: Clone> Subscription<T> {
    pub fn new(receiver: watch::Receiver<Vec<T>>) -> Self {
        Self { receiver }
    }

    /// The latest snapshot, without waiting.
    pub fn snapshot(&self) -> Vec<T> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next snapshot.
    ///
    /// Returns [`FrameworkError::SubscriptionClosed`] once the collection has shut down.
    pub async fn changed(&mut self) -> Result<Vec<T>, FrameworkError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| FrameworkError::SubscriptionClosed)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {}
}
