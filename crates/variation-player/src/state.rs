//! Per-board player state machine.
//!
//! A [`PlayerState`] tracks which ply of its variation is shown. The cursor
//! is `None` at the starting position and `Some(i)` after ply `i`; it never
//! leaves `[start, N-1]`. Transitions clamp instead of failing and report
//! whether they moved the cursor, so the caller knows when to resynchronize
//! the board.
//!
//! Timers are not started or cancelled here. The state only records which
//! autoplay timer (if any) currently drives it; the controller owns the
//! scheduler and the cross-board autoplay slot.

use std::sync::Arc;

use variation_catalog::VariationDefinition;

use crate::engine::MoveHistoryEntry;
use crate::scheduler::TimerHandle;

/// A cursor change, kept so a failed synchronization can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Cursor before the transition.
    pub from: Option<usize>,
    /// Cursor after the transition.
    pub to: Option<usize>,
}

/// Outcome of an autoplay tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The cursor advanced by one ply.
    Advanced(Transition),
    /// The last ply was already shown; autoplay should stop.
    Finished,
}

/// State of one variation board.
#[derive(Debug, Clone)]
pub struct PlayerState {
    variation: Arc<VariationDefinition>,
    history: Vec<MoveHistoryEntry>,
    cursor: Option<usize>,
    autoplay: Option<TimerHandle>,
}

impl PlayerState {
    /// Creates a state at the starting position.
    #[must_use]
    pub fn new(variation: Arc<VariationDefinition>, history: Vec<MoveHistoryEntry>) -> Self {
        Self {
            variation,
            history,
            cursor: None,
            autoplay: None,
        }
    }

    /// Returns the variation this board shows.
    #[must_use]
    pub fn variation(&self) -> &Arc<VariationDefinition> {
        &self.variation
    }

    /// Returns the parsed history.
    #[must_use]
    pub fn history(&self) -> &[MoveHistoryEntry] {
        &self.history
    }

    /// Returns the number of plies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Returns true if the variation has no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Returns the cursor (`None` = starting position).
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Returns the cursor as a ply index in `[-1, N-1]`.
    #[must_use]
    pub fn current_ply_index(&self) -> isize {
        self.cursor.map_or(-1, |i| i as isize)
    }

    /// Returns the last ply played, if any.
    #[must_use]
    pub fn current_entry(&self) -> Option<&MoveHistoryEntry> {
        self.cursor.and_then(|i| self.history.get(i))
    }

    /// Returns true at the starting position.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.cursor.is_none()
    }

    /// Returns true when no further ply can be shown.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.next_cursor().is_none()
    }

    /// Returns true if [`PlayerState::step_backward`] would move.
    #[must_use]
    pub fn can_step_backward(&self) -> bool {
        !self.is_at_start()
    }

    /// Returns true if [`PlayerState::step_forward`] would move.
    #[must_use]
    pub fn can_step_forward(&self) -> bool {
        !self.is_at_end()
    }

    /// Returns the running autoplay timer, if any.
    #[must_use]
    pub fn autoplay(&self) -> Option<TimerHandle> {
        self.autoplay
    }

    /// Returns true while autoplay drives this board.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Shows the next ply. No-op at the last ply.
    pub fn step_forward(&mut self) -> Option<Transition> {
        let to = self.next_cursor()?;
        Some(self.move_to(Some(to)))
    }

    /// Shows the previous ply. No-op at the starting position.
    pub fn step_backward(&mut self) -> Option<Transition> {
        let current = self.cursor?;
        Some(self.move_to(current.checked_sub(1)))
    }

    /// Returns to the starting position.
    ///
    /// Always reports a transition, even from the start, so the board is
    /// repainted.
    pub fn reset(&mut self) -> Transition {
        self.move_to(None)
    }

    /// Advances one ply on behalf of a running autoplay timer.
    pub fn autoplay_tick(&mut self) -> Tick {
        match self.step_forward() {
            Some(transition) => Tick::Advanced(transition),
            None => Tick::Finished,
        }
    }

    /// Undoes a transition whose synchronization failed.
    pub fn revert(&mut self, transition: Transition) {
        if self.cursor == transition.to {
            self.cursor = transition.from;
        }
    }

    pub(crate) fn attach_autoplay(&mut self, handle: TimerHandle) -> Option<TimerHandle> {
        self.autoplay.replace(handle)
    }

    pub(crate) fn detach_autoplay(&mut self) -> Option<TimerHandle> {
        self.autoplay.take()
    }

    fn next_cursor(&self) -> Option<usize> {
        let next = self.cursor.map_or(0, |i| i + 1);
        (next < self.history.len()).then_some(next)
    }

    fn move_to(&mut self, to: Option<usize>) -> Transition {
        let from = std::mem::replace(&mut self.cursor, to);
        Transition { from, to }
    }
}
