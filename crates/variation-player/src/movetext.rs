//! Move-text tokenizer.
//!
//! Splits PGN-style move text into the main line's SAN tokens. Accepted
//! input, beyond plain SAN:
//! - move numbers, attached or detached ("1.e4", "1. e4", "3...Bc5")
//! - `{...}` comments and `;` line comments
//! - `$n` NAGs and `!`/`?` glyphs after a move
//! - `(...)` side variations, skipped (they may nest)
//! - `[Tag "value"]` headers
//! - result terminators ("1-0", "0-1", "1/2-1/2", "*")
//!
//! Legality is not checked here; see [`crate::engine`].

use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while, take_while1};
use nom::character::complete::{char, digit1, multispace1, not_line_ending};
use nom::combinator::{map, recognize, value};
use nom::multi::{many0, many1};
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::IResult;
use thiserror::Error;

/// Errors produced while tokenizing move text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveTextError {
    /// A comment, variation or header is never closed.
    #[error("unterminated {what} starting at byte {offset}")]
    Unterminated {
        /// "comment", "variation" or "header".
        what: &'static str,
        /// Byte offset of the opening delimiter.
        offset: usize,
    },
    /// A character that cannot start any token.
    #[error("unexpected {found:?} at byte {offset}")]
    Unexpected {
        /// The offending character.
        found: char,
        /// Its byte offset.
        offset: usize,
    },
}

/// Splits move text into main-line SAN tokens.
///
/// Glyph suffixes are stripped and zero-style castling ("0-0") is rewritten
/// to letter-O form. Check suffixes are kept.
///
/// # Errors
///
/// Returns [`MoveTextError`] if a delimited section is unterminated or a
/// character cannot start a token.
pub fn tokenize(text: &str) -> Result<Vec<String>, MoveTextError> {
    let (rest, items) = match many0(element)(text) {
        Ok(parsed) => parsed,
        Err(_) => (text, Vec::new()),
    };

    if let Some(found) = rest.chars().next() {
        let offset = text.len() - rest.len();
        let what = match found {
            '{' => Some("comment"),
            '(' => Some("variation"),
            '[' => Some("header"),
            _ => None,
        };
        return Err(match what {
            Some(what) => MoveTextError::Unterminated { what, offset },
            None => MoveTextError::Unexpected { found, offset },
        });
    }

    Ok(items.into_iter().flatten().map(normalize).collect())
}

fn normalize(token: &str) -> String {
    let token = token.trim_end_matches(['!', '?']);
    match token {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        _ => {
            if let Some(check) = token.strip_prefix("0-0-0") {
                format!("O-O-O{check}")
            } else if let Some(check) = token.strip_prefix("0-0") {
                format!("O-O{check}")
            } else {
                token.to_string()
            }
        }
    }
}

/// One lexical element: `Some(san)` for a main-line move, `None` otherwise.
fn element(i: &str) -> IResult<&str, Option<&str>> {
    alt((
        value(None, skipped),
        value(None, result),
        value(None, move_number),
        map(san, Some),
    ))(i)
}

fn skipped(i: &str) -> IResult<&str, &str> {
    alt((
        multispace1,
        comment,
        line_comment,
        nag,
        header,
        variation,
    ))(i)
}

fn comment(i: &str) -> IResult<&str, &str> {
    delimited(char('{'), take_until("}"), char('}'))(i)
}

fn line_comment(i: &str) -> IResult<&str, &str> {
    preceded(char(';'), not_line_ending)(i)
}

fn nag(i: &str) -> IResult<&str, &str> {
    preceded(char('$'), digit1)(i)
}

fn header(i: &str) -> IResult<&str, &str> {
    delimited(char('['), take_until("]"), char(']'))(i)
}

/// A parenthesized side line; its contents are parsed so nesting balances.
fn variation(i: &str) -> IResult<&str, &str> {
    recognize(delimited(char('('), many0(element), char(')')))(i)
}

fn result(i: &str) -> IResult<&str, &str> {
    alt((tag("1-0"), tag("0-1"), tag("1/2-1/2"), tag("*")))(i)
}

fn move_number(i: &str) -> IResult<&str, &str> {
    terminated(digit1, many1(char('.')))(i)
}

fn san(i: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '=' | '+' | '#' | '-')),
        take_while(|c: char| matches!(c, '!' | '?')),
    ))(i)
}
