//! View model derived from a player state.
//!
//! Building a [`BoardView`] is pure: it replays the position and resolves the
//! annotation without touching any adapter. Painting happens afterwards, so a
//! failure here leaves the board exactly as it was.

use variation_catalog::Highlight;

use crate::annotation::{self, AnnotationLookup};
use crate::config::PlayerConfig;
use crate::engine::{EngineError, MoveEngine, PositionSnapshot};
use crate::state::PlayerState;

/// Label used for the starting position in the move heading and counter.
pub const START_LABEL: &str = "Start";

/// Text and control state for a board's panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// "1. e4", "1... e5", or "Start".
    pub move_label: String,
    /// Annotation text for the current ply.
    pub annotation: String,
    /// "{ply} / {total}", or "Start" before the first move.
    pub counter: String,
    /// Whether the previous-move control is enabled.
    pub can_step_backward: bool,
    /// Whether the next-move control is enabled.
    pub can_step_forward: bool,
    /// Whether autoplay is running.
    pub playing: bool,
}

impl PanelView {
    /// Returns the heading shown above the annotation ("Move: 1. e4").
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Move: {}", self.move_label)
    }
}

/// Everything painted for one board after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Position to draw.
    pub position: PositionSnapshot,
    /// Squares to highlight; `None` clears highlights.
    pub highlight: Option<Highlight>,
    /// Panel text and control state.
    pub panel: PanelView,
}

impl BoardView {
    /// Derives the view for the state's current ply.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if the position cannot be replayed.
    pub fn build<E: MoveEngine>(
        state: &PlayerState,
        engine: &E,
        config: &PlayerConfig,
    ) -> Result<Self, EngineError> {
        let position = engine.replay(state.history(), state.cursor())?;
        let entry = state.current_entry();

        let (annotation, highlight) = match annotation::lookup(state.variation(), entry) {
            AnnotationLookup::Start => (config.start_message.clone(), None),
            AnnotationLookup::Found(note) => (note.text.clone(), note.highlight.clone()),
            AnnotationLookup::Missing => (config.missing_annotation_message.clone(), None),
        };

        let move_label = entry.map_or_else(|| START_LABEL.to_string(), |e| e.label());
        let counter = match state.cursor() {
            None => START_LABEL.to_string(),
            Some(i) => format!("{} / {}", i + 1, state.len()),
        };

        Ok(Self {
            position,
            highlight,
            panel: PanelView {
                move_label,
                annotation,
                counter,
                can_step_backward: state.can_step_backward(),
                can_step_forward: state.can_step_forward(),
                playing: state.is_playing(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ShakmatyEngine;
    use std::sync::Arc;
    use variation_catalog::builtin::builtin_catalog;
    use variation_catalog::HighlightColor;

    fn state(id: &str) -> PlayerState {
        let catalog = builtin_catalog();
        let variation = Arc::clone(catalog.by_id(id).unwrap());
        let history = ShakmatyEngine.parse(&variation.moves).unwrap();
        PlayerState::new(variation, history)
    }

    #[test]
    fn start_view() {
        let state = state("basic-setup");
        let view = BoardView::build(&state, &ShakmatyEngine, &PlayerConfig::default()).unwrap();
        assert_eq!(view.panel.annotation, "Start of the game.");
        assert_eq!(view.panel.move_label, "Start");
        assert_eq!(view.panel.heading(), "Move: Start");
        assert_eq!(view.panel.counter, "Start");
        assert!(!view.panel.can_step_backward);
        assert!(view.panel.can_step_forward);
        assert!(view.highlight.is_none());
        assert_eq!(view.position.ply, None);
    }

    #[test]
    fn annotated_ply_with_highlight() {
        let mut state = state("basic-setup");
        for _ in 0..5 {
            state.step_forward();
        }
        let view = BoardView::build(&state, &ShakmatyEngine, &PlayerConfig::default()).unwrap();
        assert_eq!(view.panel.move_label, "3. Bc4");
        assert_eq!(view.panel.counter, "5 / 5");
        assert!(view.panel.annotation.contains("weakest point"));
        assert!(view.panel.can_step_backward);
        assert!(!view.panel.can_step_forward);
        let highlight = view.highlight.unwrap();
        assert_eq!(highlight.color, HighlightColor::Red);
        assert_eq!(highlight.squares[0].to_algebraic(), "f7");
    }

    #[test]
    fn black_ply_label() {
        let mut state = state("basic-setup");
        state.step_forward();
        state.step_forward();
        let view = BoardView::build(&state, &ShakmatyEngine, &PlayerConfig::default()).unwrap();
        assert_eq!(view.panel.move_label, "1... e5");
        assert_eq!(view.panel.counter, "2 / 5");
    }

    #[test]
    fn unannotated_ply_uses_missing_message() {
        let mut state = state("giuoco-piano");
        state.step_forward();
        let config = PlayerConfig {
            missing_annotation_message: "Nothing to add.".to_string(),
            ..PlayerConfig::default()
        };
        let view = BoardView::build(&state, &ShakmatyEngine, &config).unwrap();
        assert_eq!(view.panel.annotation, "Nothing to add.");
        assert!(view.highlight.is_none());
    }
}
