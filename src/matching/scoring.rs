use serde::{Deserialize, Serialize};

use crate::core::profile::{BuyerHardwareProfile, SequenceHardwareProfile};
use crate::core::types::{Difficulty, MatchKind};

/// Points for a buyer prop whose name equals the sequence prop name
pub const EXACT_MATCH_POINTS: u32 = 5;

/// Points for a buyer prop whose name contains, or is contained in, the sequence prop name
pub const PARTIAL_MATCH_POINTS: u32 = 2;

/// Pixel proximity tiers as (inclusive upper bound, points), tightest first
pub const PIXEL_TIERS: [(f64, u32); 3] = [(0.05, 3), (0.10, 2), (0.20, 1)];

/// Penalty applied when a beginner buyer faces an advanced sequence
pub const DIFFICULTY_PENALTY: i32 = -2;

/// Safely convert u64 to f64 for ratio calculations
///
/// Pixel counts are far below 2^53, so the conversion is exact in practice.
#[inline]
fn count_to_f64(count: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// A buyer prop that matched the sequence prop name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropMatch {
    /// Buyer prop name, as supplied
    pub name: String,

    /// Points awarded for this prop
    pub score: u32,

    #[serde(rename = "type")]
    pub kind: MatchKind,
}

/// Auditable detail behind a [`CompatibilityScore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// One entry per buyer prop that matched exactly or partially
    pub prop_matches: Vec<PropMatch>,

    /// Relative pixel difference: |buyer - sequence| / max(buyer, sequence)
    pub pixel_proximity: f64,

    /// True only for a beginner buyer against an advanced sequence
    pub difficulty_mismatch: bool,
}

/// Compatibility of one buyer display with one sequence profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityScore {
    /// `max(0, prop_score + pixel_score + difficulty_penalty)`
    pub total_score: u32,

    /// Sum of prop match points, uncapped
    pub prop_score: u32,

    /// 0 to 3 depending on pixel proximity tier
    pub pixel_score: u32,

    /// 0 or [`DIFFICULTY_PENALTY`]
    pub difficulty_penalty: i32,

    pub breakdown: ScoreBreakdown,
}

impl CompatibilityScore {
    /// Score a buyer's display against one sequence profile.
    ///
    /// Pure and deterministic: neither input is modified and identical inputs
    /// always produce identical output.
    #[must_use]
    pub fn calculate(buyer: &BuyerHardwareProfile, profile: &SequenceHardwareProfile) -> Self {
        let prop_matches = match_props(buyer, &profile.prop_name);
        let prop_score = prop_matches
            .iter()
            .fold(0u32, |acc, m| acc.saturating_add(m.score));

        let pixel_proximity = pixel_proximity(buyer.pixel_count, profile.pixel_count);
        let pixel_score = pixel_tier_score(pixel_proximity);

        let difficulty_mismatch = is_difficulty_mismatch(buyer.difficulty, profile.difficulty);
        let difficulty_penalty = if difficulty_mismatch {
            DIFFICULTY_PENALTY
        } else {
            0
        };

        let raw_total = i64::from(prop_score) + i64::from(pixel_score) + i64::from(difficulty_penalty);
        let total_score = u32::try_from(raw_total.max(0)).unwrap_or(u32::MAX);

        Self {
            total_score,
            prop_score,
            pixel_score,
            difficulty_penalty,
            breakdown: ScoreBreakdown {
                prop_matches,
                pixel_proximity,
                difficulty_mismatch,
            },
        }
    }

    /// True when the score is above zero
    pub fn is_compatible(&self) -> bool {
        self.total_score > 0
    }
}

/// Compare every buyer prop against the sequence prop name, case-insensitively.
///
/// Exact matches win over partial ones; a prop that matches neither way is
/// not recorded. Duplicate buyer props are each recorded.
fn match_props(buyer: &BuyerHardwareProfile, sequence_prop: &str) -> Vec<PropMatch> {
    let target = sequence_prop.to_lowercase();

    buyer
        .props
        .iter()
        .filter_map(|prop| {
            let name = prop.name.to_lowercase();
            let (score, kind) = if name == target {
                (EXACT_MATCH_POINTS, MatchKind::Exact)
            } else if name.contains(&target) || target.contains(&name) {
                (PARTIAL_MATCH_POINTS, MatchKind::Partial)
            } else {
                return None;
            };

            Some(PropMatch {
                name: prop.name.clone(),
                score,
                kind,
            })
        })
        .collect()
}

/// Relative pixel difference between a buyer and a sequence.
///
/// Two zero budgets are identical displays and yield 0.0 (a perfect match)
/// instead of dividing zero by zero.
fn pixel_proximity(buyer_pixels: u64, sequence_pixels: u64) -> f64 {
    let largest = buyer_pixels.max(sequence_pixels);
    if largest == 0 {
        return 0.0;
    }

    count_to_f64(buyer_pixels.abs_diff(sequence_pixels)) / count_to_f64(largest)
}

/// Map a proximity ratio to its tier points. Each tier bound is inclusive.
fn pixel_tier_score(proximity: f64) -> u32 {
    PIXEL_TIERS
        .iter()
        .find(|(bound, _)| proximity <= *bound)
        .map_or(0, |&(_, points)| points)
}

/// Only a beginner attempting an advanced sequence is penalized.
fn is_difficulty_mismatch(buyer: Option<Difficulty>, sequence: Option<Difficulty>) -> bool {
    matches!(
        (buyer, sequence),
        (Some(Difficulty::Beginner), Some(Difficulty::Advanced))
    )
}
