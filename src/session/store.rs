//! Observable session container.
//!
//! DESIGN
//! ======
//! Backed by a `tokio::sync::watch` channel. The session provider holds the
//! [`SessionStore`] and publishes every transition; consumers hold a
//! [`SessionSubscription`] and re-read the latest snapshot on each
//! notification. Publishing a snapshot equal to the current one does not wake
//! subscribers.
//!
//! TRADE-OFFS
//! ==========
//! `watch` keeps only the latest value, so a slow subscriber may skip
//! intermediate snapshots. Verdicts only depend on the latest snapshot, and
//! transitions are never reordered, so skipped ticks cannot change the outcome.

use tokio::sync::watch;

use super::SessionSnapshot;

/// Owned, observable session state. Written only by the session provider.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Start in the loading state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_snapshot(SessionSnapshot::loading())
    }

    #[must_use]
    pub fn with_snapshot(initial: SessionSnapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the current snapshot. Returns `true` if subscribers were notified.
    pub fn publish(&self, next: SessionSnapshot) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Apply an in-place edit. Subscribers are notified only if it changed anything.
    pub fn update<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut SessionSnapshot),
    {
        self.tx.send_if_modified(|current| {
            let before = current.clone();
            edit(current);
            *current != before
        })
    }

    /// Clone of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription { rx: self.tx.subscribe() }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A consumer's handle on the store. Holds a reference, never a copy.
#[derive(Debug, Clone)]
pub struct SessionSubscription {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    /// Read the latest snapshot through `read` without cloning it.
    pub fn with_current<R>(&self, read: impl FnOnce(&SessionSnapshot) -> R) -> R {
        read(&self.rx.borrow())
    }

    /// Clone of the latest snapshot, marking it as seen.
    pub fn current(&mut self) -> SessionSnapshot {
        self.rx.borrow_and_update().clone()
    }

    /// Wait for the next published transition.
    ///
    /// Returns `false` once the store has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
