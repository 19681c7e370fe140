//! Auth change stream handle.

use tokio::sync::watch;

use crate::session::AuthChange;

/// A live subscription to the auth change stream.
///
/// The first [`next`](Subscription::next) yields the current state
/// immediately, so "read the current session, then listen" composes
/// without a gap: subscribing and replaying are a single primitive.
/// Later calls wait for new notifications. Delivery is latest-state with
/// coalescing: if several changes land between polls, only the most
/// recent is observed, never reordered or merged.
pub struct Subscription {
    rx: Option<watch::Receiver<AuthChange>>,
    replayed: bool,
}

impl Subscription {
    pub(crate) fn new(rx: watch::Receiver<AuthChange>) -> Self {
        Self {
            rx: Some(rx),
            replayed: false,
        }
    }

    /// Wait for the next notification. Returns `None` once the
    /// subscription is cancelled or the client has been dropped.
    pub async fn next(&mut self) -> Option<AuthChange> {
        let rx = self.rx.as_mut()?;
        if !self.replayed {
            self.replayed = true;
            return Some(rx.borrow_and_update().clone());
        }
        match rx.changed().await {
            Ok(()) => Some(rx.borrow_and_update().clone()),
            Err(_) => {
                self.rx = None;
                None
            }
        }
    }

    /// Release the stream. Idempotent; after the first call no further
    /// notification can be observed through this handle.
    pub fn cancel(&mut self) {
        self.rx = None;
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}
