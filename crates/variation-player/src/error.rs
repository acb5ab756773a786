//! Errors surfaced by the variation controller.

use thiserror::Error;

use crate::engine::EngineError;
use crate::renderer::MountError;

/// Errors reported by [`crate::VariationController`].
///
/// Every variant concerns a single variation; the rest of the page keeps
/// working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// The selector named a variation the catalog does not have.
    #[error("no catalog entry for variation {0:?}")]
    CatalogEntryMissing(String),

    /// The variation's move text was rejected by the engine.
    #[error("cannot parse moves of {variation:?}: {source}")]
    MoveParse {
        /// Variation id.
        variation: String,
        /// Engine error.
        source: EngineError,
    },

    /// The variation's board could not be mounted.
    #[error("cannot mount board for {variation:?}: {source}")]
    Mount {
        /// Variation id.
        variation: String,
        /// Host error.
        source: MountError,
    },

    /// A position could not be replayed; the board was left unchanged.
    #[error("cannot replay {variation:?}: {source}")]
    Replay {
        /// Variation id.
        variation: String,
        /// Engine error.
        source: EngineError,
    },

    /// The variation failed to activate earlier and stays unavailable.
    #[error("variation {0:?} is unavailable")]
    BoardUnavailable(String),

    /// A control targeted a board that has not been created.
    #[error("board for variation {0:?} is not active")]
    BoardNotActive(String),
}

impl ControllerError {
    /// Returns the variation the error concerns.
    #[must_use]
    pub fn variation(&self) -> &str {
        match self {
            ControllerError::CatalogEntryMissing(id)
            | ControllerError::BoardUnavailable(id)
            | ControllerError::BoardNotActive(id) => id,
            ControllerError::MoveParse { variation, .. }
            | ControllerError::Mount { variation, .. }
            | ControllerError::Replay { variation, .. } => variation,
        }
    }
}
