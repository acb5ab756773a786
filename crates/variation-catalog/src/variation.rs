//! Variation, annotation and highlight types.

use serde::{Deserialize, Serialize};

use crate::square::Square;

/// Color tag for highlighted squares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Red,
    #[default]
    Yellow,
    Green,
    Blue,
}

impl HighlightColor {
    /// All color tags, in the order the board stylesheet declares them.
    pub const ALL: [HighlightColor; 4] = [
        HighlightColor::Red,
        HighlightColor::Yellow,
        HighlightColor::Green,
        HighlightColor::Blue,
    ];

    /// Returns the lowercase tag name ("red", "yellow", ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HighlightColor::Red => "red",
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Blue => "blue",
        }
    }

    /// Returns the CSS class applied to highlighted squares.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            HighlightColor::Red => "highlight-red",
            HighlightColor::Yellow => "highlight-yellow",
            HighlightColor::Green => "highlight-green",
            HighlightColor::Blue => "highlight-blue",
        }
    }
}

/// A set of squares to mark on the board in one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Squares to mark.
    pub squares: Vec<Square>,
    /// Color tag for all marked squares.
    pub color: HighlightColor,
}

impl Highlight {
    /// Creates a highlight for the given squares.
    #[must_use]
    pub fn new(squares: Vec<Square>, color: HighlightColor) -> Self {
        Self { squares, color }
    }
}

/// A teaching note attached to one ply of a variation.
///
/// Annotations are matched by content: the pair (`move_number`, `san`)
/// identifies the ply, not the annotation's position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAnnotation {
    /// Move-pair number (1-based, shared by White's and Black's ply).
    #[serde(rename = "move")]
    pub move_number: u32,
    /// Exact SAN of the annotated ply, including any check suffix.
    pub san: String,
    /// Explanation shown to the learner.
    pub text: String,
    /// Squares to highlight while this ply is shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
}

impl MoveAnnotation {
    /// Creates an annotation without highlights.
    #[must_use]
    pub fn new(move_number: u32, san: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            move_number,
            san: san.into(),
            text: text.into(),
            highlight: None,
        }
    }

    /// Attaches a highlight directive.
    #[must_use]
    pub fn with_highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Returns true if this annotation describes the given ply.
    #[must_use]
    pub fn matches(&self, move_number: u32, san: &str) -> bool {
        self.move_number == move_number && self.san == san
    }
}

/// A named, pre-scripted line with its move text and annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationDefinition {
    /// Unique key, also the prefix of the board's element ids.
    pub id: String,
    /// Name shown in the selector.
    pub name: String,
    /// Move list in SAN with move numbers (e.g., "1.e4 e5 2.Nf3").
    pub moves: String,
    /// Sparse, content-matched annotations.
    #[serde(default)]
    pub annotations: Vec<MoveAnnotation>,
}

impl VariationDefinition {
    /// Creates a variation with no annotations.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, moves: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            moves: moves.into(),
            annotations: Vec::new(),
        }
    }

    /// Sets the annotation list.
    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<MoveAnnotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Finds the annotation for a ply, matching by move number and SAN.
    ///
    /// Returns `None` when this variation has no note for the ply; lookups
    /// never fall back to another variation's annotations.
    #[must_use]
    pub fn annotation_for(&self, move_number: u32, san: &str) -> Option<&MoveAnnotation> {
        self.annotations
            .iter()
            .find(|a| a.matches(move_number, san))
    }
}

/// A static position rendered as a small, non-interactive board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticPosition {
    /// Element id of the board container.
    pub id: String,
    /// Position in FEN.
    pub fen: String,
}

impl TacticPosition {
    /// Creates a tactic position.
    #[must_use]
    pub fn new(id: impl Into<String>, fen: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fen: fen.into(),
        }
    }
}
