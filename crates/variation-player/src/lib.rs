//! Interactive players for annotated chess variations.
//!
//! This crate provides the host-independent half of the variation viewer:
//! - [`ShakmatyEngine`] behind the [`MoveEngine`] trait for parsing move text
//!   and replaying positions
//! - [`PlayerState`], the per-board cursor state machine
//! - [`BoardView`], the pure view model painted after each transition
//! - [`VariationController`], which owns every board and enforces that only
//!   one board autoplays at a time
//!
//! The page itself is reached through the [`BoardHost`], [`BoardRenderer`],
//! [`ControlPanel`] and [`Scheduler`] traits.

pub mod annotation;
mod config;
mod controller;
mod engine;
mod error;
pub mod movetext;
mod renderer;
mod scheduler;
mod state;
mod view;

pub use annotation::AnnotationLookup;
pub use config::{ConfigError, PlayerConfig};
pub use controller::{Board, VariationController};
pub use engine::{
    move_number_for_ply, EngineError, MoveEngine, MoveHistoryEntry, PositionSnapshot,
    ShakmatyEngine, Side,
};
pub use error::ControllerError;
pub use movetext::MoveTextError;
pub use renderer::{BoardHost, BoardRenderer, ControlPanel, MountError};
pub use scheduler::{AutoplaySlot, Scheduler, TimerHandle};
pub use state::{PlayerState, Tick, Transition};
pub use view::{BoardView, PanelView, START_LABEL};

pub use variation_catalog::{
    Catalog, Highlight, HighlightColor, MoveAnnotation, Square, VariationDefinition,
};
