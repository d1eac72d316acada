//! Trailing-edge debounce for search input.

use std::time::Duration;

use shared::domain::SearchTerm;
use tokio::task::JoinHandle;
use tracing::trace;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Fired once input has been quiet for the debounce interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedTrigger {
    pub term: SearchTerm,
    pub ticket: u64,
}

/// Owns at most one live timer. Scheduling again aborts the previous timer, and
/// every schedule gets a fresh ticket so a trigger that was already in flight
/// when its timer got aborted can still be recognised as superseded.
pub struct QueryDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    ticket: u64,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            ticket: 0,
        }
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Reschedules the trigger for `term`. `fire` runs on the timer task once the
    /// delay elapses without another call. Must be called from within a tokio runtime.
    pub fn on_input<F>(&mut self, term: SearchTerm, fire: F) -> u64
    where
        F: FnOnce(DebouncedTrigger) + Send + 'static,
    {
        self.abort_pending();
        self.ticket += 1;
        let trigger = DebouncedTrigger {
            term,
            ticket: self.ticket,
        };
        let delay = self.delay;
        trace!(ticket = trigger.ticket, ?delay, "debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(trigger);
        }));
        self.ticket
    }

    /// Claims a fired trigger. Returns false when a later input or a cancel
    /// superseded it.
    pub fn accept(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.pending.is_none() {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn cancel(&mut self) {
        if self.abort_pending() {
            trace!(ticket = self.ticket, "debounce cancelled");
        }
        self.ticket += 1;
    }

    fn abort_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}

#[cfg(test)]
#[path = "tests/debouncer_tests.rs"]
mod tests;
