//! Annotated opening variations for the variation player.
//!
//! This crate provides the read-only data every other part of the player
//! consumes:
//! - [`VariationDefinition`] - a named line with its move text and annotations
//! - [`MoveAnnotation`] and [`Highlight`] - per-move teaching notes
//! - [`TacticPosition`] - static positions shown as mini boards
//! - [`Catalog`] - lookup by id, JSON loading and validation
//!
//! The built-in Italian Opening catalog lives in [`builtin`].

pub mod builtin;
mod catalog;
mod square;
mod variation;

pub use catalog::{Catalog, CatalogError};
pub use square::Square;
pub use variation::{
    Highlight, HighlightColor, MoveAnnotation, TacticPosition, VariationDefinition,
};
