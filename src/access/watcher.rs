//! Re-evaluate a guard on every session transition.
//!
//! SYSTEM CONTEXT
//! ==============
//! A mounted surface holds one watcher. The UI layer awaits verdicts from it
//! and navigates on `Redirect`. The watcher never caches the snapshot: each
//! verdict is computed from the latest value in the store.

use super::{Guard, RedirectReason, Verdict, evaluate};
use crate::session::SessionSubscription;

pub struct GateWatcher {
    session: SessionSubscription,
    guard: Guard,
    last: Option<Verdict>,
}

impl GateWatcher {
    #[must_use]
    pub fn new(session: SessionSubscription, guard: Guard) -> Self {
        Self { session, guard, last: None }
    }

    #[must_use]
    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    /// Verdict for the latest snapshot.
    #[must_use]
    pub fn current(&self) -> Verdict {
        self.session
            .with_current(|snapshot| evaluate(snapshot, &self.guard))
    }

    /// Wait for the next session transition and return the re-evaluated verdict.
    ///
    /// Returns `None` once the session store has been dropped.
    pub async fn changed(&mut self) -> Option<Verdict> {
        if !self.session.changed().await {
            return None;
        }
        let snapshot = self.session.current();
        let verdict = evaluate(&snapshot, &self.guard);
        if self.last != Some(verdict) {
            tracing::debug!(
                ?verdict,
                reason = verdict.redirect_reason().map(RedirectReason::as_str),
                loading = snapshot.loading,
                "gate verdict changed"
            );
            self.last = Some(verdict);
        }
        Some(verdict)
    }

    /// Wait until the verdict is conclusive (`Allow` or `Redirect`).
    ///
    /// Never returns `Wait`. Returns `None` if the store is dropped while the
    /// session is still loading.
    pub async fn settle(&mut self) -> Option<Verdict> {
        let verdict = self.current();
        if !verdict.is_wait() {
            self.last = Some(verdict);
            return Some(verdict);
        }
        loop {
            let verdict = self.changed().await?;
            if !verdict.is_wait() {
                return Some(verdict);
            }
        }
    }
}

#[cfg(test)]
#[path = "watcher_test.rs"]
mod tests;
