//! Move engine adapter.
//!
//! The player never reasons about chess rules itself. A [`MoveEngine`] turns
//! move text into a [`MoveHistoryEntry`] list and replays a prefix of that
//! history into a [`PositionSnapshot`]. [`ShakmatyEngine`] is the
//! implementation backed by the `shakmaty` rules library.

use std::fmt;

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position};
use thiserror::Error;

use crate::movetext::{self, MoveTextError};

/// Errors reported by a move engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move text could not be tokenized.
    #[error("malformed move text: {0}")]
    Syntax(#[from] MoveTextError),

    /// A token is not valid SAN.
    #[error("invalid SAN {token:?} at ply {ply}")]
    InvalidSan {
        /// 0-based ply index.
        ply: usize,
        /// The offending token.
        token: String,
    },

    /// A SAN token does not name a legal move in its position.
    #[error("illegal move {san:?} at ply {ply}")]
    IllegalMove {
        /// 0-based ply index.
        ply: usize,
        /// The SAN that failed.
        san: String,
    },

    /// Replay was asked for a ply past the end of the history.
    #[error("ply {ply} out of range for history of {len} plies")]
    OutOfRange {
        /// Requested ply index.
        ply: usize,
        /// History length.
        len: usize,
    },

    /// A FEN string could not be parsed or is not a legal setup.
    #[error("invalid FEN {0:?}")]
    InvalidFen(String),
}

/// The side that played a ply, or that is to move in a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// One ply of a parsed variation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveHistoryEntry {
    /// 0-based position in the history.
    pub ply_index: usize,
    /// Side that played this ply.
    pub side: Side,
    /// Move-pair number, 1-based.
    pub move_number: u32,
    /// Canonical SAN, with `+` or `#` suffix when the move gives check.
    pub san: String,
}

impl MoveHistoryEntry {
    /// Returns the move label shown above the annotation ("1. e4", "1... e5").
    #[must_use]
    pub fn label(&self) -> String {
        match self.side {
            Side::White => format!("{}. {}", self.move_number, self.san),
            Side::Black => format!("{}... {}", self.move_number, self.san),
        }
    }
}

/// Returns the move-pair number for a 0-based ply index.
///
/// Histories always start from the standard position, so White plays the
/// even plies.
#[inline]
#[must_use]
pub fn move_number_for_ply(ply_index: usize) -> u32 {
    (ply_index / 2 + 1) as u32
}

/// A board position produced by replaying a history prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionSnapshot {
    /// Full FEN of the position.
    pub fen: String,
    /// Piece placement only, as board widgets expect it.
    pub board_fen: String,
    /// Side to move.
    pub side_to_move: Side,
    /// Last ply played to reach this position; `None` for the start.
    pub ply: Option<usize>,
}

impl PositionSnapshot {
    fn of(pos: &Chess, ply: Option<usize>) -> Self {
        Self {
            fen: Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string(),
            board_fen: pos.board().to_string(),
            side_to_move: pos.turn().into(),
            ply,
        }
    }
}

/// Parses move text and replays positions.
pub trait MoveEngine {
    /// Parses move text into an ordered history.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the text is not a well-formed sequence of
    /// legal moves from the standard starting position.
    fn parse(&self, move_text: &str) -> Result<Vec<MoveHistoryEntry>, EngineError>;

    /// Replays `history[0..=upto]` from the standard starting position.
    ///
    /// `None` yields the starting position. Replay always starts from scratch.
    ///
    /// # Errors
    ///
    /// Never fails for a prefix of a history this engine produced; returns
    /// [`EngineError::OutOfRange`] or a SAN error otherwise.
    fn replay(
        &self,
        history: &[MoveHistoryEntry],
        upto: Option<usize>,
    ) -> Result<PositionSnapshot, EngineError>;
}

/// [`MoveEngine`] backed by `shakmaty`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShakmatyEngine;

impl ShakmatyEngine {
    /// Creates the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Loads a static position, as used by the tactic mini boards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidFen`] if the FEN does not parse or does
    /// not describe a legal position.
    pub fn position_from_fen(&self, fen: &str) -> Result<PositionSnapshot, EngineError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| EngineError::InvalidFen(fen.to_string()))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| EngineError::InvalidFen(fen.to_string()))?;
        Ok(PositionSnapshot::of(&pos, None))
    }

    fn play_san(pos: Chess, ply: usize, token: &str) -> Result<(Chess, San), EngineError> {
        let san_plus: SanPlus = token.parse().map_err(|_| EngineError::InvalidSan {
            ply,
            token: token.to_string(),
        })?;
        let illegal = || EngineError::IllegalMove {
            ply,
            san: token.to_string(),
        };
        let m = san_plus.san.to_move(&pos).map_err(|_| illegal())?;
        let canonical = San::from_move(&pos, &m);
        let next = pos.play(&m).map_err(|_| illegal())?;
        Ok((next, canonical))
    }
}

impl MoveEngine for ShakmatyEngine {
    fn parse(&self, move_text: &str) -> Result<Vec<MoveHistoryEntry>, EngineError> {
        let tokens = movetext::tokenize(move_text)?;
        let mut pos = Chess::default();
        let mut history = Vec::with_capacity(tokens.len());

        for (ply_index, token) in tokens.iter().enumerate() {
            let side = Side::from(pos.turn());
            let (next, canonical) = Self::play_san(pos, ply_index, token)?;
            let suffix = if next.is_checkmate() {
                "#"
            } else if next.is_check() {
                "+"
            } else {
                ""
            };
            history.push(MoveHistoryEntry {
                ply_index,
                side,
                move_number: move_number_for_ply(ply_index),
                san: format!("{canonical}{suffix}"),
            });
            pos = next;
        }

        Ok(history)
    }

    fn replay(
        &self,
        history: &[MoveHistoryEntry],
        upto: Option<usize>,
    ) -> Result<PositionSnapshot, EngineError> {
        let mut pos = Chess::default();
        if let Some(last) = upto {
            if last >= history.len() {
                return Err(EngineError::OutOfRange {
                    ply: last,
                    len: history.len(),
                });
            }
            for entry in &history[..=last] {
                pos = Self::play_san(pos, entry.ply_index, &entry.san)?.0;
            }
        }
        Ok(PositionSnapshot::of(&pos, upto))
    }
}
