//! Search control — cooperative cancellation only.
//!
//! There is deliberately no time-based soft/hard limit machinery here: the
//! only way to stop a search in progress is to set the shared flag, which
//! the recursive engine checks between moves at every node (see
//! [`crate::search::engine::search`]). A driver that wants a wall-clock
//! budget builds it on top of this by spawning a timer thread that calls
//! [`SearchControl::stop`] — that policy lives in the binary wiring
//! `lgo-cli` does, not in the engine itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The single cancellation signal shared between a search and whatever is
/// driving it.
#[derive(Clone, Default)]
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
}

impl SearchControl {
    pub fn new() -> SearchControl {
        SearchControl {
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The flag the recursive search reads directly.
    pub fn flag(&self) -> &AtomicBool {
        &self.stopped
    }

    /// Shared handle to the flag, for a thread that wants to set it
    /// asynchronously (a `h` command arriving while a search runs, or an
    /// external timeout).
    pub fn handle(&self) -> Arc<AtomicBool> {
        self.stopped.clone()
    }

    /// Request that the current and any future search using this control
    /// stop as soon as the move loop next checks.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    /// Clear the flag so this control can be reused for a fresh search.
    pub fn reset(&self) {
        self.stopped.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_control_is_not_stopped() {
        let control = SearchControl::new();
        assert!(!control.is_stopped());
    }

    #[test]
    fn stop_is_visible_through_a_cloned_handle() {
        let control = SearchControl::new();
        let handle = control.handle();
        control.stop();
        assert!(handle.load(Ordering::Relaxed));
    }

    #[test]
    fn reset_clears_a_stopped_flag() {
        let control = SearchControl::new();
        control.stop();
        control.reset();
        assert!(!control.is_stopped());
    }
}
