//! Board square used by highlight directives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A square on the board, stored as an index from a1 (0) to h8 (63).
///
/// Serialized as its algebraic name (`"f7"`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Creates a square from a file (0-7, a-h) and rank (0-7, 1-8).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Parses algebraic notation (e.g., "e4").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase().checked_sub(b'a')?;
        let rank = bytes[1].checked_sub(b'1')?;
        Square::new(file, rank)
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file index (0-7).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank index (0-7).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s).ok_or_else(|| format!("invalid square: {s:?}"))
    }
}

impl TryFrom<String> for Square {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_algebraic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1").map(Square::index), Some(0));
        assert_eq!(Square::from_algebraic("e4").map(Square::index), Some(28));
        assert_eq!(Square::from_algebraic("h8").map(Square::index), Some(63));
        assert_eq!(Square::from_algebraic("F7").map(Square::index), Some(53));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e44"), None);
    }

    #[test]
    fn square_to_algebraic() {
        let f7 = Square::new(5, 6).unwrap();
        assert_eq!(f7.to_algebraic(), "f7");
        assert_eq!(f7.to_string(), "f7");
        assert_eq!(format!("{f7:?}"), "Square(f7)");
    }

    #[test]
    fn square_serde_uses_algebraic_name() {
        let squares: Vec<Square> = serde_json::from_str(r#"["f7", "e6"]"#).unwrap();
        assert_eq!(squares[0].to_algebraic(), "f7");
        assert_eq!(serde_json::to_string(&squares).unwrap(), r#"["f7","e6"]"#);

        let bad: Result<Square, _> = serde_json::from_str(r#""z9""#);
        assert!(bad.is_err());
    }
}
