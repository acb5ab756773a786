//! Annotation lookup for the current ply.

use variation_catalog::{MoveAnnotation, VariationDefinition};

use crate::engine::MoveHistoryEntry;

/// Outcome of looking up the note for a ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLookup<'a> {
    /// No move has been played yet.
    Start,
    /// The variation annotates this ply.
    Found(&'a MoveAnnotation),
    /// The variation has no note for this ply.
    Missing,
}

impl<'a> AnnotationLookup<'a> {
    /// Returns the matched annotation, if any.
    #[must_use]
    pub fn annotation(self) -> Option<&'a MoveAnnotation> {
        match self {
            AnnotationLookup::Found(annotation) => Some(annotation),
            AnnotationLookup::Start | AnnotationLookup::Missing => None,
        }
    }
}

/// Looks up the note for `entry` within `variation`, by move number and SAN.
///
/// Only the variation's own annotations are searched.
#[must_use]
pub fn lookup<'a>(
    variation: &'a VariationDefinition,
    entry: Option<&MoveHistoryEntry>,
) -> AnnotationLookup<'a> {
    match entry {
        None => AnnotationLookup::Start,
        Some(entry) => variation
            .annotation_for(entry.move_number, &entry.san)
            .map_or(AnnotationLookup::Missing, AnnotationLookup::Found),
    }
}
