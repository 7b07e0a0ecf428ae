use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

use crate::core::sequence::Sequence;
use crate::core::types::SequenceId;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate sequence id in catalog: {0}")]
    DuplicateId(SequenceId),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub sequences: Vec<Sequence>,
}

/// The sequence catalog with lookup indexes
#[derive(Debug, Default)]
pub struct SequenceCatalog {
    /// All listed sequences, in catalog order
    pub sequences: Vec<Sequence>,

    /// Index: sequence ID -> index in sequences vec
    id_to_index: HashMap<SequenceId, usize>,

    /// Index: lowercased category -> indices of sequences
    category_to_seqs: HashMap<String, Vec<usize>>,
}

impl SequenceCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded demo catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded JSON cannot be parsed.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/sequences.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from a file when a path is given, otherwise the embedded catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_embedded(),
        }
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or duplicate sequence ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for sequence in data.sequences {
            catalog.add_sequence(sequence)?;
        }

        tracing::debug!("Loaded catalog with {} sequences", catalog.len());
        Ok(catalog)
    }

    /// Add a sequence to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if a sequence with the same id exists.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<(), CatalogError> {
        if self.id_to_index.contains_key(&sequence.id) {
            return Err(CatalogError::DuplicateId(sequence.id));
        }

        let index = self.sequences.len();
        self.id_to_index.insert(sequence.id.clone(), index);
        self.category_to_seqs
            .entry(sequence.category.to_lowercase())
            .or_default()
            .push(index);

        self.sequences.push(sequence);
        Ok(())
    }

    /// Get a sequence by ID
    pub fn get(&self, id: &SequenceId) -> Option<&Sequence> {
        self.id_to_index.get(id).map(|&idx| &self.sequences[idx])
    }

    /// Sequences in a category, case-insensitive, in catalog order
    pub fn in_category(&self, category: &str) -> Vec<&Sequence> {
        self.category_to_seqs
            .get(&category.trim().to_lowercase())
            .map(|indices| indices.iter().map(|&idx| &self.sequences[idx]).collect())
            .unwrap_or_default()
    }

    /// All distinct categories, lowercased and sorted
    pub fn categories(&self) -> Vec<String> {
        self.category_to_seqs
            .keys()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            sequences: self.sequences.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of sequences in catalog
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
