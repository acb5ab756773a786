//! Variation catalog storage, loading and lookup.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::variation::{TacticPosition, VariationDefinition};

/// Errors that can occur when building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error (including invalid square names).
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Two entries share an id.
    #[error("duplicate catalog id: {0}")]
    DuplicateId(String),

    /// An annotation cannot match any ply.
    #[error("invalid annotation in {variation}: {reason}")]
    InvalidAnnotation {
        /// Id of the variation holding the annotation.
        variation: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// On-disk shape of a catalog.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    variations: Vec<VariationDefinition>,
    #[serde(default)]
    tactics: Vec<TacticPosition>,
}

/// The set of variations a page can select from, plus its tactic boards.
///
/// Entries keep their insertion order, which is also the selector order.
/// Variations are shared with the boards that display them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    variations: Vec<Arc<VariationDefinition>>,
    tactics: Vec<TacticPosition>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, validating ids and annotations.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two variations (or two tactic
    /// positions) share an id, or [`CatalogError::InvalidAnnotation`] if an
    /// annotation has move number 0 or an empty SAN.
    pub fn with_entries(
        variations: Vec<VariationDefinition>,
        tactics: Vec<TacticPosition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for variation in variations {
            catalog.add(variation)?;
        }
        for tactic in tactics {
            catalog.add_tactic(tactic)?;
        }
        Ok(catalog)
    }

    /// Builds a catalog from entries known to be valid.
    pub(crate) fn from_trusted(
        variations: Vec<VariationDefinition>,
        tactics: Vec<TacticPosition>,
    ) -> Self {
        Self {
            variations: variations.into_iter().map(Arc::new).collect(),
            tactics,
        }
    }

    /// Parses a catalog from JSON.
    ///
    /// The expected shape is `{"variations": [...], "tactics": [...]}`, with
    /// `tactics` optional.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::JsonError`] for malformed JSON and the
    /// validation errors of [`Catalog::with_entries`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::with_entries(file.variations, file.tactics)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the file cannot be read, plus
    /// every error of [`Catalog::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the catalog back to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::JsonError`] if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            variations: self.variations.iter().map(|v| (**v).clone()).collect(),
            tactics: self.tactics.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Adds a variation.
    ///
    /// # Errors
    ///
    /// See [`Catalog::with_entries`].
    pub fn add(&mut self, variation: VariationDefinition) -> Result<(), CatalogError> {
        if self.contains(&variation.id) {
            return Err(CatalogError::DuplicateId(variation.id));
        }
        validate_annotations(&variation)?;
        self.variations.push(Arc::new(variation));
        Ok(())
    }

    /// Adds a tactic position.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if the id is already used by
    /// another tactic position.
    pub fn add_tactic(&mut self, tactic: TacticPosition) -> Result<(), CatalogError> {
        if self.tactics.iter().any(|t| t.id == tactic.id) {
            return Err(CatalogError::DuplicateId(tactic.id));
        }
        self.tactics.push(tactic);
        Ok(())
    }

    /// Returns the number of variations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variations.len()
    }

    /// Returns true if the catalog has no variations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variations.is_empty()
    }

    /// Returns true if a variation with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.variations.iter().any(|v| v.id == id)
    }

    /// Finds a variation by id.
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&Arc<VariationDefinition>> {
        self.variations.iter().find(|v| v.id == id)
    }

    /// Returns all variations in selector order.
    #[must_use]
    pub fn variations(&self) -> &[Arc<VariationDefinition>] {
        &self.variations
    }

    /// Returns variation ids in selector order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.variations.iter().map(|v| v.id.as_str())
    }

    /// Returns the first variation, the selector's natural default.
    #[must_use]
    pub fn first(&self) -> Option<&Arc<VariationDefinition>> {
        self.variations.first()
    }

    /// Returns the static tactic positions.
    #[must_use]
    pub fn tactics(&self) -> &[TacticPosition] {
        &self.tactics
    }
}

fn validate_annotations(variation: &VariationDefinition) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for annotation in &variation.annotations {
        let reason = if annotation.move_number == 0 {
            Some(format!("move number 0 for {:?}", annotation.san))
        } else if annotation.san.trim().is_empty() {
            Some(format!("empty SAN at move {}", annotation.move_number))
        } else if !seen.insert((annotation.move_number, annotation.san.as_str())) {
            Some(format!(
                "duplicate annotation for {}.{}",
                annotation.move_number, annotation.san
            ))
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(CatalogError::InvalidAnnotation {
                variation: variation.id.clone(),
                reason,
            });
        }
    }
    Ok(())
}
