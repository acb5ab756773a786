//! Board and page adapters.
//!
//! The controller paints through these traits, so the state machine runs
//! unchanged against the browser host or an in-memory test host.

use thiserror::Error;
use variation_catalog::{HighlightColor, Square, VariationDefinition};

use crate::engine::PositionSnapshot;
use crate::view::PanelView;

/// Errors raised while mounting a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// The page has no container for this board.
    #[error("container for board #{0} not found")]
    ContainerMissing(String),

    /// The board widget could not be created in its container.
    #[error("board widget #{container} failed to load: {reason}")]
    WidgetUnavailable {
        /// Container element id.
        container: String,
        /// What the widget library reported.
        reason: String,
    },
}

/// A visual chessboard widget.
pub trait BoardRenderer {
    /// Draws a position.
    fn render(&mut self, position: &PositionSnapshot);

    /// Replaces the highlighted squares. An empty slice clears highlights.
    fn highlight(&mut self, squares: &[Square], color: HighlightColor);

    /// Recomputes the widget's pixel geometry.
    ///
    /// Must be called whenever the widget's container becomes visible.
    fn force_resize(&mut self);
}

/// The per-board controls and text regions around a widget.
pub trait ControlPanel {
    /// Updates move label, annotation, counter and navigation buttons.
    fn paint(&mut self, view: &PanelView);

    /// Shows the play (`false`) or pause (`true`) icon.
    fn set_playing(&mut self, playing: bool);
}

/// The page hosting every variation board.
pub trait BoardHost {
    /// Widget type for one board.
    type Renderer: BoardRenderer;
    /// Control surface for one board.
    type Panel: ControlPanel;

    /// Creates the widget and controls for a variation's container.
    ///
    /// # Errors
    ///
    /// Returns [`MountError::ContainerMissing`] if the page has no container
    /// for this variation.
    fn mount(
        &mut self,
        variation: &VariationDefinition,
    ) -> Result<(Self::Renderer, Self::Panel), MountError>;

    /// Hides every board container.
    fn hide_all(&mut self);

    /// Shows one board container.
    fn show(&mut self, variation_id: &str);
}
