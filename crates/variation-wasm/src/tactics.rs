//! Static tactic diagrams.

use variation_catalog::TacticPosition;
use variation_player::ShakmatyEngine;
use web_sys::Document;

use crate::board::{create_widget, Chessboard, WidgetConfig};

/// Draws every tactic position whose container is on the page.
///
/// Positions with an invalid FEN are skipped with a warning. Returns the
/// created widgets.
pub fn mount_diagrams(
    document: &Document,
    tactics: &[TacticPosition],
    piece_theme: &str,
) -> Vec<Chessboard> {
    let engine = ShakmatyEngine::new();
    let mut widgets = Vec::new();
    for tactic in tactics {
        if document.get_element_by_id(&tactic.id).is_none() {
            continue;
        }
        let position = match engine.position_from_fen(&tactic.fen) {
            Ok(position) => position,
            Err(err) => {
                tracing::warn!("Skipping diagram {}: {}", tactic.id, err);
                continue;
            }
        };
        match create_widget(
            &tactic.id,
            &WidgetConfig::diagram(&position.board_fen, piece_theme),
        ) {
            Ok(widget) => widgets.push(widget),
            Err(err) => tracing::warn!("{}", err),
        }
    }
    tracing::debug!("Mounted {} tactic diagrams", widgets.len());
    widgets
}
