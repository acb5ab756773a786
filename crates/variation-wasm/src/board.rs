//! chessboard.js widget binding.

use serde::Serialize;
use variation_player::{BoardRenderer, HighlightColor, MountError, PositionSnapshot, Square};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

/// Default piece images.
pub const DEFAULT_PIECE_THEME: &str =
    "https://chessboardjs.com/img/chesspieces/wikipedia/{piece}.png";

/// Class chessboard.js puts on every square element.
const SQUARE_CLASS: &str = "square-55d63";

#[wasm_bindgen]
extern "C" {
    /// A chessboard.js board.
    pub type Chessboard;

    #[wasm_bindgen(js_name = Chessboard, catch)]
    fn create(container_id: &str, config: &JsValue) -> Result<Chessboard, JsValue>;

    #[wasm_bindgen(method)]
    fn position(this: &Chessboard, fen: &str);

    #[wasm_bindgen(method)]
    fn resize(this: &Chessboard);
}

/// Options passed to the chessboard.js constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    /// "start" or a FEN placement.
    pub position: String,
    /// Lets the user drag pieces.
    pub draggable: bool,
    /// Draws file and rank labels.
    pub show_notation: bool,
    /// Piece image URL pattern with a `{piece}` placeholder.
    pub piece_theme: String,
}

impl WidgetConfig {
    /// Config for an interactive variation board.
    pub fn variation(piece_theme: &str) -> Self {
        Self {
            position: "start".to_string(),
            draggable: false,
            show_notation: true,
            piece_theme: piece_theme.to_string(),
        }
    }

    /// Config for a static tactic diagram.
    pub fn diagram(board_fen: &str, piece_theme: &str) -> Self {
        Self {
            position: board_fen.to_string(),
            draggable: false,
            show_notation: false,
            piece_theme: piece_theme.to_string(),
        }
    }
}

/// Creates a widget in the element with id `container_id`.
///
/// # Errors
///
/// Returns [`MountError::WidgetUnavailable`] if the config cannot be
/// converted or chessboard.js throws (for example when it is not loaded).
pub fn create_widget(container_id: &str, config: &WidgetConfig) -> Result<Chessboard, MountError> {
    let unavailable = |reason: String| MountError::WidgetUnavailable {
        container: container_id.to_string(),
        reason,
    };
    let options = serde_wasm_bindgen::to_value(config).map_err(|e| unavailable(e.to_string()))?;
    create(container_id, &options).map_err(|e| unavailable(format!("{:?}", e)))
}

/// Selector for one square of a board.
pub fn square_selector(container_id: &str, square: Square) -> String {
    format!("#{} .square-{}", container_id, square)
}

/// Selector for every square of a board.
pub fn all_squares_selector(container_id: &str) -> String {
    format!("#{} .{}", container_id, SQUARE_CLASS)
}

/// [`BoardRenderer`] drawing into a chessboard.js widget.
pub struct DomBoard {
    document: Document,
    container_id: String,
    widget: Chessboard,
}

impl DomBoard {
    /// Wraps a widget created in `container_id`.
    pub fn new(document: Document, container_id: String, widget: Chessboard) -> Self {
        Self {
            document,
            container_id,
            widget,
        }
    }

    fn clear_highlights(&self) {
        let Ok(squares) = self
            .document
            .query_selector_all(&all_squares_selector(&self.container_id))
        else {
            return;
        };
        for i in 0..squares.length() {
            let Some(square) = squares.get(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            for color in HighlightColor::ALL {
                if let Err(err) = square.class_list().remove_1(color.css_class()) {
                    tracing::debug!(
                        "Cannot clear {} on #{}: {:?}",
                        color.css_class(),
                        self.container_id,
                        err
                    );
                }
            }
        }
    }
}

impl BoardRenderer for DomBoard {
    fn render(&mut self, position: &PositionSnapshot) {
        self.widget.position(&position.board_fen);
    }

    fn highlight(&mut self, squares: &[Square], color: HighlightColor) {
        self.clear_highlights();
        let class = color.css_class();
        for &square in squares {
            match self
                .document
                .query_selector(&square_selector(&self.container_id, square))
            {
                Ok(Some(element)) => {
                    if let Err(err) = element.class_list().add_1(class) {
                        tracing::debug!(
                            "Cannot mark {} on #{}: {:?}",
                            square,
                            self.container_id,
                            err
                        );
                    }
                }
                _ => tracing::debug!("No square {} on #{}", square, self.container_id),
            }
        }
    }

    fn force_resize(&mut self) {
        self.widget.resize();
    }
}
