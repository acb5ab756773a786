//! Timer scheduling and the global autoplay slot.

use std::time::Duration;

/// Identifies one running autoplay timer.
///
/// Handles are issued by the [`Scheduler`] and are never reused within a
/// session, so a tick carrying an old handle can be recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

/// Host timer facility.
///
/// Timers call back into the host, which forwards autoplay ticks to
/// [`crate::VariationController::on_autoplay_tick`] and due resizes to
/// [`crate::VariationController::on_resize_due`].
pub trait Scheduler {
    /// Starts a repeating timer that ticks autoplay for `variation_id`.
    fn start_autoplay(&mut self, variation_id: &str, interval: Duration) -> TimerHandle;

    /// Cancels a timer. Cancelling an already-cancelled timer does nothing.
    fn cancel(&mut self, handle: TimerHandle);

    /// Schedules a one-shot resize of the board for `variation_id`.
    fn schedule_resize(&mut self, variation_id: &str, delay: Duration);
}

/// The single "autoplay is running" slot shared by all boards.
///
/// A board must claim the slot before starting its timer; claiming displaces
/// the previous owner, whose timer the caller then stops.
#[derive(Debug, Clone, Default)]
pub struct AutoplaySlot {
    owner: Option<String>,
}

impl AutoplaySlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board currently holding the slot.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Claims the slot for `variation_id`.
    ///
    /// Returns the displaced owner, if it was a different board.
    pub fn claim(&mut self, variation_id: &str) -> Option<String> {
        match self.owner.replace(variation_id.to_string()) {
            Some(previous) if previous != variation_id => Some(previous),
            _ => None,
        }
    }

    /// Releases the slot if `variation_id` holds it.
    pub fn release(&mut self, variation_id: &str) {
        if self.owner.as_deref() == Some(variation_id) {
            self.owner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_empty_slot() {
        let mut slot = AutoplaySlot::new();
        assert_eq!(slot.claim("a"), None);
        assert_eq!(slot.owner(), Some("a"));
    }

    #[test]
    fn claim_displaces_other_owner() {
        let mut slot = AutoplaySlot::new();
        slot.claim("a");
        assert_eq!(slot.claim("b"), Some("a".to_string()));
        assert_eq!(slot.owner(), Some("b"));
    }

    #[test]
    fn reclaim_by_owner_displaces_nobody() {
        let mut slot = AutoplaySlot::new();
        slot.claim("a");
        assert_eq!(slot.claim("a"), None);
    }

    #[test]
    fn release_only_by_owner() {
        let mut slot = AutoplaySlot::new();
        slot.claim("a");
        slot.release("b");
        assert_eq!(slot.owner(), Some("a"));
        slot.release("a");
        assert_eq!(slot.owner(), None);
        // Idempotent
        slot.release("a");
        assert_eq!(slot.owner(), None);
    }
}
