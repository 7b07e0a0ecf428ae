//! Core data types for sequence compatibility scoring.
//!
//! - [`BuyerHardwareProfile`]: the props, pixel budget and skill of a buyer's display
//! - [`SequenceHardwareProfile`]: one hardware configuration a sequence supports
//! - [`Sequence`]: a catalog listing with its compatibility profiles
//! - [`SequenceId`], [`ProfileId`], [`Difficulty`], [`MatchKind`]: identifiers and enums
//!
//! [`BuyerHardwareProfile`]: profile::BuyerHardwareProfile
//! [`SequenceHardwareProfile`]: profile::SequenceHardwareProfile
//! [`Sequence`]: sequence::Sequence
//! [`SequenceId`]: types::SequenceId
//! [`ProfileId`]: types::ProfileId
//! [`Difficulty`]: types::Difficulty
//! [`MatchKind`]: types::MatchKind

pub mod profile;
pub mod sequence;
pub mod types;
