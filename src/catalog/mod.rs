//! Sequence catalog storage and indexing.
//!
//! The catalog lists purchasable light sequences with their compatibility
//! profiles. A small demo catalog is compiled into the binary, and custom
//! catalogs can be loaded from JSON files with the same layout.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sequence_fit::SequenceCatalog;
//! use sequence_fit::core::types::SequenceId;
//! use std::path::Path;
//!
//! let catalog = SequenceCatalog::load_embedded().unwrap();
//! for sequence in catalog.in_category("halloween") {
//!     println!("{} ({} profiles)", sequence.id, sequence.profiles.len());
//! }
//!
//! let thriller = catalog.get(&SequenceId::new("thriller-full-house"));
//!
//! // Custom catalog
//! let custom = SequenceCatalog::load_from_file(Path::new("my_catalog.json")).unwrap();
//! ```

pub mod store;
