use serde::Serialize;
use thiserror::Error;

use crate::catalog::store::SequenceCatalog;
use crate::core::profile::{BuyerHardwareProfile, SequenceHardwareProfile};
use crate::core::sequence::Sequence;
use crate::core::types::{ProfileId, SequenceId};
use crate::matching::ranking::{rank_sequences, RankedPage, RankingConfig, RankingQuery};
use crate::matching::scoring::CompatibilityScore;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Sequence '{0}' not found in catalog")]
    UnknownSequence(SequenceId),

    #[error("Sequence '{0}' has no compatibility profiles")]
    NoProfiles(SequenceId),
}

/// Score of one sequence profile, labelled with the profile it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileScore {
    pub profile_id: ProfileId,

    #[serde(flatten)]
    pub score: CompatibilityScore,
}

/// Result of scoring every profile of a single sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceMatch {
    pub sequence_id: SequenceId,

    /// Highest total across all profiles; the first profile wins ties
    pub best_score: ProfileScore,

    /// One entry per profile, in catalog order
    pub all_scores: Vec<ProfileScore>,
}

/// Pick the highest-scoring profile. Ties keep the earliest profile.
#[must_use]
pub fn best_score(
    buyer: &BuyerHardwareProfile,
    profiles: &[SequenceHardwareProfile],
) -> Option<ProfileScore> {
    profiles
        .iter()
        .map(|profile| score_profile(buyer, profile))
        .fold(None, pick_best)
}

/// Score all profiles of a sequence. Returns `None` when it has no profiles.
#[must_use]
pub fn score_sequence(buyer: &BuyerHardwareProfile, sequence: &Sequence) -> Option<SequenceMatch> {
    let all_scores: Vec<ProfileScore> = sequence
        .profiles
        .iter()
        .map(|profile| score_profile(buyer, profile))
        .collect();

    let best = all_scores.iter().cloned().fold(None, pick_best)?;

    Some(SequenceMatch {
        sequence_id: sequence.id.clone(),
        best_score: best,
        all_scores,
    })
}

fn score_profile(buyer: &BuyerHardwareProfile, profile: &SequenceHardwareProfile) -> ProfileScore {
    ProfileScore {
        profile_id: profile.id.clone(),
        score: CompatibilityScore::calculate(buyer, profile),
    }
}

fn pick_best(best: Option<ProfileScore>, candidate: ProfileScore) -> Option<ProfileScore> {
    match best {
        Some(current) if current.score.total_score >= candidate.score.total_score => Some(current),
        _ => Some(candidate),
    }
}

/// Catalog-backed entry point for single-sequence scoring and ranking
pub struct MatchingEngine<'a> {
    catalog: &'a SequenceCatalog,
    config: RankingConfig,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    pub fn new(catalog: &'a SequenceCatalog) -> Self {
        Self {
            catalog,
            config: RankingConfig::default(),
        }
    }

    /// Create a new matching engine with custom configuration
    pub fn with_config(catalog: &'a SequenceCatalog, config: RankingConfig) -> Self {
        Self { catalog, config }
    }

    /// Score every profile of one catalog sequence against a buyer
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownSequence` if the id is not in the catalog, or
    /// `MatchError::NoProfiles` if the sequence lists no compatibility profiles.
    pub fn score_by_id(
        &self,
        buyer: &BuyerHardwareProfile,
        id: &SequenceId,
    ) -> Result<SequenceMatch, MatchError> {
        let sequence = self
            .catalog
            .get(id)
            .ok_or_else(|| MatchError::UnknownSequence(id.clone()))?;

        let result =
            score_sequence(buyer, sequence).ok_or_else(|| MatchError::NoProfiles(id.clone()))?;

        tracing::debug!(
            sequence = %id,
            profiles = result.all_scores.len(),
            best = result.best_score.score.total_score,
            "Scored sequence"
        );

        Ok(result)
    }

    /// Score, filter, sort and paginate the whole catalog for a buyer
    pub fn rank(&self, buyer: &BuyerHardwareProfile, query: &RankingQuery) -> RankedPage {
        rank_sequences(&self.catalog.sequences, buyer, query, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Difficulty;
    use chrono::{TimeZone, Utc};

    fn make_sequence(profiles: Vec<SequenceHardwareProfile>) -> Sequence {
        Sequence::new(
            "seq",
            "Test Sequence",
            "christmas",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_profiles(profiles)
    }

    #[test]
    fn test_best_score_picks_highest_total() {
        let buyer = BuyerHardwareProfile::new(4000).with_prop("Mini Tree", 8);
        let sequence = make_sequence(vec![
            SequenceHardwareProfile::new("mega", "Mega Tree", 16000),
            SequenceHardwareProfile::new("mini", "Mini Tree", 4000),
        ]);

        let result = score_sequence(&buyer, &sequence).unwrap();
        assert_eq!(result.all_scores.len(), 2);
        assert_eq!(result.all_scores[0].profile_id, ProfileId::new("mega"));
        assert_eq!(result.best_score.profile_id, ProfileId::new("mini"));
        assert_eq!(result.best_score.score.total_score, 8);
    }

    #[test]
    fn test_best_score_ties_keep_first_profile() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Arch", 4);
        let profiles = vec![
            SequenceHardwareProfile::new("first", "Arch", 1000),
            SequenceHardwareProfile::new("second", "arch", 1000),
        ];

        let best = best_score(&buyer, &profiles).unwrap();
        assert_eq!(best.profile_id, ProfileId::new("first"));
    }

    #[test]
    fn test_no_profiles_yields_none() {
        let buyer = BuyerHardwareProfile::new(1000);
        assert!(score_sequence(&buyer, &make_sequence(Vec::new())).is_none());
        assert!(best_score(&buyer, &[]).is_none());
    }

    #[test]
    fn test_score_by_id_uses_embedded_catalog() {
        let catalog = SequenceCatalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);
        let buyer = BuyerHardwareProfile::new(16000)
            .with_prop("Mega Tree", 1)
            .with_difficulty(Difficulty::Beginner);

        let result = engine
            .score_by_id(&buyer, &SequenceId::new("carol-of-the-bells-mega-tree"))
            .unwrap();
        assert_eq!(result.best_score.profile_id, ProfileId::new("carol-mega"));
        assert_eq!(result.best_score.score.total_score, 8);
    }

    #[test]
    fn test_score_by_id_errors() {
        let catalog = SequenceCatalog::load_embedded().unwrap();
        let engine = MatchingEngine::new(&catalog);
        let buyer = BuyerHardwareProfile::new(1000);

        let missing = engine.score_by_id(&buyer, &SequenceId::new("does-not-exist"));
        assert!(matches!(missing, Err(MatchError::UnknownSequence(_))));

        let empty = engine.score_by_id(&buyer, &SequenceId::new("silent-night-draft"));
        assert!(matches!(empty, Err(MatchError::NoProfiles(_))));
    }

    #[test]
    fn test_profile_score_serializes_flat() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Arch", 1);
        let best = best_score(&buyer, &[SequenceHardwareProfile::new("a1", "Arch", 1000)]).unwrap();
        let json = serde_json::to_value(&best).unwrap();
        assert_eq!(json["profileId"], "a1");
        assert_eq!(json["totalScore"], 8);
        assert!(json["breakdown"]["propMatches"].is_array());
    }
}
