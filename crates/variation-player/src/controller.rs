//! Selector and lifecycle controller.
//!
//! [`VariationController`] is the single source of truth for which variation
//! is visible. It owns every board created during the session (keyed by
//! variation id, never evicted), the host adapters, and the autoplay slot
//! that keeps at most one autoplay timer running across all boards.
//!
//! Host events map onto methods one to one:
//!
//! | Event | Method |
//! |-------|--------|
//! | dropdown change | [`VariationController::select`] |
//! | next / previous / reset button | [`VariationController::step_forward`], [`VariationController::step_backward`], [`VariationController::reset`] |
//! | play/pause button | [`VariationController::toggle_autoplay`] |
//! | autoplay timer | [`VariationController::on_autoplay_tick`] |
//! | delayed post-creation resize | [`VariationController::on_resize_due`] |
//! | window load / resize | [`VariationController::resize_all`] |

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use variation_catalog::{Catalog, HighlightColor};

use crate::config::PlayerConfig;
use crate::engine::MoveEngine;
use crate::error::ControllerError;
use crate::renderer::{BoardHost, BoardRenderer, ControlPanel};
use crate::scheduler::{AutoplaySlot, Scheduler, TimerHandle};
use crate::state::{PlayerState, Tick, Transition};
use crate::view::BoardView;

/// A mounted board: its state plus the adapters that display it.
#[derive(Debug)]
pub struct Board<R, P> {
    state: PlayerState,
    renderer: R,
    panel: P,
}

impl<R: BoardRenderer, P: ControlPanel> Board<R, P> {
    /// Returns the player state.
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Returns the board widget.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the control panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    fn paint(&mut self, view: &BoardView) {
        self.renderer.render(&view.position);
        match &view.highlight {
            Some(highlight) => self.renderer.highlight(&highlight.squares, highlight.color),
            None => self.renderer.highlight(&[], HighlightColor::default()),
        }
        self.panel.paint(&view.panel);
    }
}

/// What a tick asked the controller to do once the board borrow ends.
enum TickOutcome {
    Painted,
    Finished,
    Failed(ControllerError),
}

/// Owns every variation board on the page and routes host events to them.
pub struct VariationController<E: MoveEngine, H: BoardHost, S: Scheduler> {
    catalog: Catalog,
    engine: E,
    host: H,
    scheduler: S,
    config: PlayerConfig,
    boards: HashMap<String, Board<H::Renderer, H::Panel>>,
    broken: HashSet<String>,
    active: Option<String>,
    autoplay: AutoplaySlot,
}

impl<E: MoveEngine, H: BoardHost, S: Scheduler> VariationController<E, H, S> {
    /// Creates a controller with no boards.
    pub fn new(catalog: Catalog, engine: E, host: H, scheduler: S, config: PlayerConfig) -> Self {
        Self {
            catalog,
            engine,
            host,
            scheduler,
            config,
            boards: HashMap::new(),
            broken: HashSet::new(),
            active: None,
            autoplay: AutoplaySlot::new(),
        }
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Returns the page host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Returns the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the scheduler mutably.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Returns the visible variation's id.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Returns the variation to show at startup: the configured default, or
    /// the catalog's first entry.
    pub fn default_selection(&self) -> Option<&str> {
        self.config
            .default_variation
            .as_deref()
            .or_else(|| self.catalog.first().map(|v| v.id.as_str()))
    }

    /// Returns a mounted board.
    pub fn board(&self, variation_id: &str) -> Option<&Board<H::Renderer, H::Panel>> {
        self.boards.get(variation_id)
    }

    /// Returns a board's player state.
    pub fn state(&self, variation_id: &str) -> Option<&PlayerState> {
        self.boards.get(variation_id).map(|b| &b.state)
    }

    /// Returns the number of boards created so far.
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Returns the board holding the autoplay slot.
    pub fn autoplay_owner(&self) -> Option<&str> {
        self.autoplay.owner()
    }

    /// Returns true if the variation failed to activate.
    pub fn is_broken(&self, variation_id: &str) -> bool {
        self.broken.contains(variation_id)
    }

    /// Handles a selector change.
    ///
    /// Hides every board, stops autoplay on any other board, creates the
    /// selected board on first use, then shows it and forces a resize.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::CatalogEntryMissing`] for an unknown id (the
    /// visible board is left alone), the activation error on first use of a
    /// broken variation, and [`ControllerError::BoardUnavailable`] when such a
    /// variation is selected again. In the failure cases the variation's
    /// container stays hidden.
    pub fn select(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        tracing::debug!("Variation selected: {}", variation_id);

        if !self.catalog.contains(variation_id) {
            tracing::error!("No catalog entry for variation {:?}", variation_id);
            return Err(ControllerError::CatalogEntryMissing(variation_id.to_string()));
        }

        self.host.hide_all();
        self.active = None;

        if let Some(owner) = self
            .autoplay
            .owner()
            .filter(|owner| *owner != variation_id)
            .map(str::to_owned)
        {
            self.stop_autoplay(&owner);
        }

        if self.broken.contains(variation_id) {
            tracing::warn!("Variation {} is unavailable", variation_id);
            return Err(ControllerError::BoardUnavailable(variation_id.to_string()));
        }

        if !self.boards.contains_key(variation_id) {
            if let Err(err) = self.activate(variation_id) {
                tracing::error!("Failed to activate variation {}: {}", variation_id, err);
                self.broken.insert(variation_id.to_string());
                return Err(err);
            }
        }

        self.host.show(variation_id);
        if let Some(board) = self.boards.get_mut(variation_id) {
            board.renderer.force_resize();
        }
        self.active = Some(variation_id.to_string());
        Ok(())
    }

    /// Shows the next ply, stopping this board's autoplay first.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::BoardNotActive`] for an unknown board, or
    /// [`ControllerError::Replay`] if the position could not be replayed (the
    /// cursor is restored).
    pub fn step_forward(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        self.stop_autoplay(variation_id);
        self.navigate(variation_id, PlayerState::step_forward)
    }

    /// Shows the previous ply, stopping this board's autoplay first.
    ///
    /// # Errors
    ///
    /// See [`VariationController::step_forward`].
    pub fn step_backward(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        self.stop_autoplay(variation_id);
        self.navigate(variation_id, PlayerState::step_backward)
    }

    /// Stops autoplay and returns to the starting position.
    ///
    /// # Errors
    ///
    /// See [`VariationController::step_forward`].
    pub fn reset(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        self.stop_autoplay(variation_id);
        self.navigate(variation_id, |state| Some(state.reset()))
    }

    /// Starts autoplay if it is stopped, stops it if it is running.
    ///
    /// # Errors
    ///
    /// See [`VariationController::step_forward`].
    pub fn toggle_autoplay(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        let playing = self
            .boards
            .get(variation_id)
            .ok_or_else(|| ControllerError::BoardNotActive(variation_id.to_string()))?
            .state
            .is_playing();

        if playing {
            self.stop_autoplay(variation_id);
            Ok(())
        } else {
            self.start_autoplay(variation_id)
        }
    }

    /// Starts autoplay on a board, stopping any other board's autoplay.
    ///
    /// Starting from the last ply restarts from the beginning.
    ///
    /// # Errors
    ///
    /// See [`VariationController::step_forward`].
    pub fn start_autoplay(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        if !self.boards.contains_key(variation_id) {
            return Err(ControllerError::BoardNotActive(variation_id.to_string()));
        }

        if let Some(displaced) = self.autoplay.claim(variation_id) {
            self.halt_autoplay(&displaced);
        }

        let at_end = self
            .boards
            .get(variation_id)
            .is_some_and(|b| b.state.is_at_end());
        if at_end {
            if let Err(err) = self.navigate(variation_id, |state| Some(state.reset())) {
                self.autoplay.release(variation_id);
                return Err(err);
            }
        }

        let handle = self
            .scheduler
            .start_autoplay(variation_id, self.config.autoplay_interval());
        if let Some(board) = self.boards.get_mut(variation_id) {
            if let Some(previous) = board.state.attach_autoplay(handle) {
                self.scheduler.cancel(previous);
            }
            board.panel.set_playing(true);
        }
        tracing::debug!("Autoplay started for {} ({:?})", variation_id, handle);
        Ok(())
    }

    /// Stops a board's autoplay. Does nothing if it is not running.
    pub fn stop_autoplay(&mut self, variation_id: &str) {
        self.autoplay.release(variation_id);
        self.halt_autoplay(variation_id);
    }

    /// Handles an autoplay timer tick.
    ///
    /// Ticks whose handle is not the board's current timer are stale and are
    /// ignored. A tick at the last ply stops autoplay.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Replay`] if the next position could not be
    /// replayed; autoplay is stopped in that case.
    pub fn on_autoplay_tick(
        &mut self,
        variation_id: &str,
        handle: TimerHandle,
    ) -> Result<(), ControllerError> {
        let Some(board) = self.boards.get_mut(variation_id) else {
            tracing::debug!("Ignoring tick for unknown board {}", variation_id);
            self.scheduler.cancel(handle);
            return Ok(());
        };

        if board.state.autoplay() != Some(handle) {
            tracing::debug!("Ignoring stale autoplay tick for {}", variation_id);
            self.scheduler.cancel(handle);
            return Ok(());
        }

        let outcome = match board.state.autoplay_tick() {
            Tick::Advanced(transition) => {
                match Self::synchronize(&self.engine, &self.config, board, transition) {
                    Ok(()) => TickOutcome::Painted,
                    Err(err) => TickOutcome::Failed(err),
                }
            }
            Tick::Finished => TickOutcome::Finished,
        };

        match outcome {
            TickOutcome::Painted => Ok(()),
            TickOutcome::Finished => {
                self.stop_autoplay(variation_id);
                Ok(())
            }
            TickOutcome::Failed(err) => {
                tracing::error!("Autoplay stopped for {}: {}", variation_id, err);
                self.stop_autoplay(variation_id);
                Err(err)
            }
        }
    }

    /// Runs the delayed resize scheduled when a board was created.
    pub fn on_resize_due(&mut self, variation_id: &str) {
        if let Some(board) = self.boards.get_mut(variation_id) {
            board.renderer.force_resize();
        }
    }

    /// Re-measures every board, for window load and resize events.
    pub fn resize_all(&mut self) {
        for board in self.boards.values_mut() {
            board.renderer.force_resize();
        }
    }

    /// Creates, paints and caches the board for a variation.
    fn activate(&mut self, variation_id: &str) -> Result<(), ControllerError> {
        let variation = self
            .catalog
            .by_id(variation_id)
            .map(Arc::clone)
            .ok_or_else(|| ControllerError::CatalogEntryMissing(variation_id.to_string()))?;

        let history =
            self.engine
                .parse(&variation.moves)
                .map_err(|source| ControllerError::MoveParse {
                    variation: variation_id.to_string(),
                    source,
                })?;

        let (renderer, panel) =
            self.host
                .mount(&variation)
                .map_err(|source| ControllerError::Mount {
                    variation: variation_id.to_string(),
                    source,
                })?;

        let mut board = Board {
            state: PlayerState::new(variation, history),
            renderer,
            panel,
        };
        let view = BoardView::build(&board.state, &self.engine, &self.config).map_err(
            |source| ControllerError::Replay {
                variation: variation_id.to_string(),
                source,
            },
        )?;
        board.paint(&view);

        tracing::info!(
            "Created board for {} ({} plies)",
            variation_id,
            board.state.len()
        );
        self.scheduler
            .schedule_resize(variation_id, self.config.initial_resize_delay());
        self.boards.insert(variation_id.to_string(), board);
        Ok(())
    }

    /// Applies a transition and repaints, undoing it if the view fails.
    fn navigate(
        &mut self,
        variation_id: &str,
        transition: impl FnOnce(&mut PlayerState) -> Option<Transition>,
    ) -> Result<(), ControllerError> {
        let board = self
            .boards
            .get_mut(variation_id)
            .ok_or_else(|| ControllerError::BoardNotActive(variation_id.to_string()))?;

        let Some(transition) = transition(&mut board.state) else {
            return Ok(());
        };

        Self::synchronize(&self.engine, &self.config, board, transition).map_err(|err| {
            tracing::error!("Failed to update board {}: {}", variation_id, err);
            err
        })
    }

    /// Builds the view for the board's new cursor and paints it.
    ///
    /// On failure the transition is reverted and nothing is painted.
    fn synchronize(
        engine: &E,
        config: &PlayerConfig,
        board: &mut Board<H::Renderer, H::Panel>,
        transition: Transition,
    ) -> Result<(), ControllerError> {
        match BoardView::build(&board.state, engine, config) {
            Ok(view) => {
                board.paint(&view);
                Ok(())
            }
            Err(source) => {
                board.state.revert(transition);
                Err(ControllerError::Replay {
                    variation: board.state.variation().id.clone(),
                    source,
                })
            }
        }
    }

    /// Cancels a board's timer and resets its play/pause control, without
    /// touching the autoplay slot.
    fn halt_autoplay(&mut self, variation_id: &str) {
        if let Some(board) = self.boards.get_mut(variation_id) {
            if let Some(handle) = board.state.detach_autoplay() {
                self.scheduler.cancel(handle);
                board.panel.set_playing(false);
                tracing::debug!("Autoplay stopped for {} ({:?})", variation_id, handle);
            }
        }
    }
}
