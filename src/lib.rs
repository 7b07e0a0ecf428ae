//! # sequence-fit
//!
//! Compatibility scoring for an LED light-sequence marketplace.
//!
//! Buyers describe their display: the props they own, the total number of
//! pixels they drive, and how comfortable they are with complex setups.
//! Sellers list sequences together with one or more hardware profiles the
//! sequence was built for. `sequence-fit` scores each profile against the
//! buyer's display and ranks the catalog by the best fit.
//!
//! ## Scoring
//!
//! - **Prop matching**: +5 for every exact prop name match, +2 for a partial
//!   (substring) match, case-insensitive
//! - **Pixel proximity**: up to +3 when the buyer's pixel count is close to
//!   the profile's
//! - **Difficulty**: -2 when a beginner looks at an advanced sequence
//!
//! Totals never go below zero.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sequence_fit::{BuyerHardwareProfile, MatchingEngine, SequenceCatalog, SequenceId};
//! use sequence_fit::core::types::Difficulty;
//!
//! // Load the embedded demo catalog
//! let catalog = SequenceCatalog::load_embedded().unwrap();
//!
//! let buyer = BuyerHardwareProfile::new(16_000)
//!     .with_prop("Mega Tree", 1)
//!     .with_difficulty(Difficulty::Intermediate);
//!
//! let engine = MatchingEngine::new(&catalog);
//! let result = engine
//!     .score_by_id(&buyer, &SequenceId::new("carol-of-the-bells-mega-tree"))
//!     .unwrap();
//!
//! println!("best profile {}: {}", result.best_score.profile_id, result.best_score.score.total_score);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Sequence catalog storage and indexing
//! - [`core`]: Core data types for sequences and hardware profiles
//! - [`matching`]: Scoring, best-profile selection and catalog ranking
//! - [`utils`]: Input validation
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: JSON web API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::store::SequenceCatalog;
pub use core::profile::{BuyerHardwareProfile, PropCount, SequenceHardwareProfile};
pub use core::sequence::Sequence;
pub use core::types::*;
pub use matching::engine::{MatchError, MatchingEngine, SequenceMatch};
pub use matching::ranking::{RankedPage, RankingQuery, SortKey};
pub use matching::scoring::CompatibilityScore;
