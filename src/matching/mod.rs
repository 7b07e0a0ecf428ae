//! Compatibility scoring, best-profile selection and catalog ranking.
//!
//! - [`CompatibilityScore`]: score of one buyer display against one sequence profile
//! - [`MatchingEngine`]: catalog-backed single-sequence scoring and ranking
//! - [`rank_sequences`]: filter, sort and paginate many sequences by fitness
//!
//! ## Scoring
//!
//! A score adds up three signals:
//!
//! 1. **Props**: +5 for every buyer prop whose name equals the sequence prop
//!    name (case-insensitive), +2 when one name contains the other
//! 2. **Pixels**: +3, +2 or +1 when the relative pixel difference is within
//!    5%, 10% or 20%
//! 3. **Difficulty**: -2 when a beginner buyer faces an advanced sequence
//!
//! The total never drops below zero.
//!
//! ## Example
//!
//! ```rust
//! use sequence_fit::core::profile::{BuyerHardwareProfile, SequenceHardwareProfile};
//! use sequence_fit::core::types::Difficulty;
//! use sequence_fit::matching::scoring::CompatibilityScore;
//!
//! let buyer = BuyerHardwareProfile::new(16_000)
//!     .with_prop("Mega Tree", 1)
//!     .with_difficulty(Difficulty::Beginner);
//! let profile = SequenceHardwareProfile::new("p1", "mega tree", 16_000);
//!
//! let score = CompatibilityScore::calculate(&buyer, &profile);
//! assert_eq!(score.total_score, 8);
//! ```
//!
//! [`CompatibilityScore`]: scoring::CompatibilityScore
//! [`MatchingEngine`]: engine::MatchingEngine
//! [`rank_sequences`]: ranking::rank_sequences

pub mod engine;
pub mod ranking;
pub mod scoring;
