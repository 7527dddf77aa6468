//! Dispatcher allows effects to dispatch actions back to the store

use crate::action::Action;
use tokio::sync::mpsc;

/// Dispatcher for sending actions into the store's dispatch queue
///
/// Actions dispatched here are applied in queue order by the dispatch pump,
/// one at a time, never while another dispatch is in progress.
#[derive(Clone, Debug)]
pub struct Dispatcher<A> {
    tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> Dispatcher<A> {
    /// Create a new dispatcher feeding the given queue
    pub fn new(tx: mpsc::UnboundedSender<A>) -> Self {
        Self { tx }
    }

    /// Queue an action for dispatch
    pub fn dispatch(&self, action: A) {
        if let Err(e) = self.tx.send(action) {
            log::error!(
                "Failed to dispatch action {}: dispatch queue closed",
                e.0.kind()
            );
        }
    }
}
