//! Catalog-wide ranking: score every sequence, filter, sort, paginate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::profile::BuyerHardwareProfile;
use crate::core::sequence::Sequence;
use crate::core::types::ProfileId;
use crate::matching::engine::best_score;
use crate::matching::scoring::ScoreBreakdown;

/// Default number of sequences per page
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Upper bound on sequences per page
pub const MAX_PAGE_LIMIT: usize = 100;

/// Configuration for the ranking engine
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Page size used when a query does not ask for one
    pub default_limit: usize,
    /// Largest page size a query may request
    pub max_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// Key used to order ranked sequences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Best compatibility score, highest first
    #[default]
    Compatibility,
    /// Price, cheapest first
    Price,
    /// Rating, highest first
    Rating,
    /// Listing date, most recent first
    Newest,
    /// Download count, most downloaded first
    Downloads,
}

/// Filters, ordering and paging for a ranking request
#[derive(Debug, Clone, Default)]
pub struct RankingQuery {
    /// Only consider sequences in this category (case-insensitive)
    pub category: Option<String>,
    pub sort: SortKey,
    /// 1-based page number; 0 is treated as 1
    pub page: usize,
    /// Page size; `None` uses the configured default
    pub limit: Option<usize>,
    /// Sequences whose best score is below this are dropped
    pub min_compatibility_score: f64,
}

/// A catalog sequence annotated with its best compatibility score
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSequence {
    #[serde(flatten)]
    pub sequence: Sequence,

    /// Best total score across the sequence's profiles; 0 without profiles
    pub compatibility_score: u32,

    /// True when the best score is above zero
    pub is_compatible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_profile_id: Option<ProfileId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    /// Sequences that passed the filters, across all pages
    pub total: usize,
    pub total_pages: usize,
}

/// One page of ranked sequences
#[derive(Debug, Clone, Serialize)]
pub struct RankedPage {
    pub sequences: Vec<RankedSequence>,
    pub pagination: Pagination,
}

/// Safely convert u32 score to f64 for threshold comparison
#[inline]
fn score_to_f64(score: u32) -> f64 {
    f64::from(score)
}

/// Rank sequences for a buyer.
///
/// Sorting is stable, so sequences that compare equal keep their input order.
#[must_use]
pub fn rank_sequences(
    sequences: &[Sequence],
    buyer: &BuyerHardwareProfile,
    query: &RankingQuery,
    config: &RankingConfig,
) -> RankedPage {
    let category = query.category.as_deref().map(str::trim).filter(|c| !c.is_empty());

    let mut ranked: Vec<RankedSequence> = sequences
        .iter()
        .filter(|s| category.map_or(true, |c| s.in_category(c)))
        .map(|s| annotate(s, buyer))
        .filter(|r| score_to_f64(r.compatibility_score) >= query.min_compatibility_score)
        .collect();

    ranked.sort_by(|a, b| compare(a, b, query.sort));

    let limit = query
        .limit
        .unwrap_or(config.default_limit)
        .clamp(1, config.max_limit.max(1));
    let page = query.page.max(1);
    let total = ranked.len();

    let sequences: Vec<RankedSequence> = ranked
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    tracing::debug!(
        total,
        page,
        limit,
        returned = sequences.len(),
        sort = ?query.sort,
        "Ranked sequences"
    );

    RankedPage {
        sequences,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    }
}

fn annotate(sequence: &Sequence, buyer: &BuyerHardwareProfile) -> RankedSequence {
    let best = best_score(buyer, &sequence.profiles);
    let compatibility_score = best.as_ref().map_or(0, |b| b.score.total_score);
    let is_compatible = best.as_ref().is_some_and(|b| b.score.is_compatible());

    RankedSequence {
        sequence: sequence.clone(),
        compatibility_score,
        is_compatible,
        best_profile_id: best.as_ref().map(|b| b.profile_id.clone()),
        breakdown: best.map(|b| b.score.breakdown),
    }
}

fn compare(a: &RankedSequence, b: &RankedSequence, key: SortKey) -> Ordering {
    match key {
        SortKey::Compatibility => b.compatibility_score.cmp(&a.compatibility_score),
        SortKey::Price => a.sequence.price_cents.cmp(&b.sequence.price_cents),
        SortKey::Rating => b
            .sequence
            .rating
            .partial_cmp(&a.sequence.rating)
            .unwrap_or(Ordering::Equal),
        SortKey::Newest => b.sequence.created_at.cmp(&a.sequence.created_at),
        SortKey::Downloads => b.sequence.download_count.cmp(&a.sequence.download_count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::SequenceCatalog;
    use crate::core::profile::SequenceHardwareProfile;
    use chrono::{TimeZone, Utc};

    fn seq(id: &str, category: &str, prop: &str, pixels: u64) -> Sequence {
        Sequence::new(
            id,
            id,
            category,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_profiles(vec![SequenceHardwareProfile::new(
            format!("{id}-p"),
            prop,
            pixels,
        )])
    }

    fn ids(page: &RankedPage) -> Vec<&str> {
        page.sequences
            .iter()
            .map(|r| r.sequence.id.as_str())
            .collect()
    }

    fn fixture() -> Vec<Sequence> {
        vec![
            seq("arch", "christmas", "Arch", 1000).with_price(1200).with_rating(4.5),
            seq("tree", "christmas", "Mega Tree", 1000).with_price(1500).with_rating(4.8),
            seq("spinner", "halloween", "Spinner", 1000).with_price(900).with_rating(4.2),
            seq("far", "halloween", "Matrix", 50_000).with_price(0).with_rating(3.9),
        ]
    }

    #[test]
    fn test_sorts_by_compatibility_descending() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Mega Tree", 1);
        let page = rank_sequences(
            &fixture(),
            &buyer,
            &RankingQuery::default(),
            &RankingConfig::default(),
        );

        // tree = 5 + 3, arch/spinner = 3, far = 0; equal scores keep input order
        assert_eq!(ids(&page), vec!["tree", "arch", "spinner", "far"]);
        assert_eq!(page.sequences[0].compatibility_score, 8);
        assert!(page.sequences[0].is_compatible);
        assert!(!page.sequences[3].is_compatible);
        assert_eq!(page.pagination.total, 4);
    }

    #[test]
    fn test_min_score_filters_before_paging() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Mega Tree", 1);
        let query = RankingQuery {
            min_compatibility_score: 4.0,
            ..RankingQuery::default()
        };
        let page = rank_sequences(&fixture(), &buyer, &query, &RankingConfig::default());
        assert_eq!(ids(&page), vec!["tree"]);
        assert_eq!(page.pagination.total, 1);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let buyer = BuyerHardwareProfile::new(1000);
        let query = RankingQuery {
            category: Some("HALLOWEEN".to_string()),
            sort: SortKey::Price,
            ..RankingQuery::default()
        };
        let page = rank_sequences(&fixture(), &buyer, &query, &RankingConfig::default());
        assert_eq!(ids(&page), vec!["far", "spinner"]);
    }

    #[test]
    fn test_category_filter_handles_non_ascii_case() {
        let sequences = vec![
            seq("noel", "Noël", "Arch", 1000),
            seq("arch", "christmas", "Arch", 1000),
        ];
        let query = RankingQuery {
            category: Some(" NOËL ".to_string()),
            ..RankingQuery::default()
        };
        let page = rank_sequences(
            &sequences,
            &BuyerHardwareProfile::new(1000),
            &query,
            &RankingConfig::default(),
        );
        assert_eq!(ids(&page), vec!["noel"]);

        // Catalog listing and ranking agree on the same filter
        let mut catalog = SequenceCatalog::new();
        for sequence in &sequences {
            catalog.add_sequence(sequence.clone()).unwrap();
        }
        assert_eq!(catalog.in_category(" NOËL ").len(), page.pagination.total);
    }

    #[test]
    fn test_sort_keys() {
        let buyer = BuyerHardwareProfile::new(1000);
        let run = |sort| {
            let query = RankingQuery {
                sort,
                ..RankingQuery::default()
            };
            let page = rank_sequences(&fixture(), &buyer, &query, &RankingConfig::default());
            ids(&page).into_iter().map(String::from).collect::<Vec<_>>()
        };

        assert_eq!(run(SortKey::Price), vec!["far", "spinner", "arch", "tree"]);
        assert_eq!(run(SortKey::Rating), vec!["tree", "arch", "spinner", "far"]);
    }

    #[test]
    fn test_newest_and_downloads_sorting() {
        let buyer = BuyerHardwareProfile::new(1000);
        let older = seq("older", "c", "Arch", 1000).with_downloads(10);
        let mut newer = seq("newer", "c", "Arch", 1000).with_downloads(5);
        newer.created_at = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let sequences = vec![older, newer];

        let newest = RankingQuery {
            sort: SortKey::Newest,
            ..RankingQuery::default()
        };
        let page = rank_sequences(&sequences, &buyer, &newest, &RankingConfig::default());
        assert_eq!(ids(&page), vec!["newer", "older"]);

        let downloads = RankingQuery {
            sort: SortKey::Downloads,
            ..RankingQuery::default()
        };
        let page = rank_sequences(&sequences, &buyer, &downloads, &RankingConfig::default());
        assert_eq!(ids(&page), vec!["older", "newer"]);
    }

    #[test]
    fn test_pagination() {
        let buyer = BuyerHardwareProfile::new(1000);
        let query = RankingQuery {
            sort: SortKey::Price,
            page: 2,
            limit: Some(3),
            ..RankingQuery::default()
        };
        let page = rank_sequences(&fixture(), &buyer, &query, &RankingConfig::default());
        assert_eq!(ids(&page), vec!["tree"]);
        assert_eq!(page.pagination.page, 2);
        assert_eq!(page.pagination.limit, 3);
        assert_eq!(page.pagination.total_pages, 2);

        let past_end = RankingQuery {
            page: 9,
            ..query
        };
        let page = rank_sequences(&fixture(), &buyer, &past_end, &RankingConfig::default());
        assert!(page.sequences.is_empty());
        assert_eq!(page.pagination.total, 4);
    }

    #[test]
    fn test_limit_is_clamped() {
        let buyer = BuyerHardwareProfile::new(1000);
        let config = RankingConfig {
            default_limit: 2,
            max_limit: 3,
        };

        let page = rank_sequences(&fixture(), &buyer, &RankingQuery::default(), &config);
        assert_eq!(page.pagination.limit, 2);
        assert_eq!(page.pagination.page, 1);

        let huge = RankingQuery {
            limit: Some(1000),
            ..RankingQuery::default()
        };
        assert_eq!(rank_sequences(&fixture(), &buyer, &huge, &config).pagination.limit, 3);

        let zero = RankingQuery {
            limit: Some(0),
            ..RankingQuery::default()
        };
        assert_eq!(rank_sequences(&fixture(), &buyer, &zero, &config).pagination.limit, 1);
    }

    #[test]
    fn test_sequence_without_profiles_scores_zero() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Arch", 1);
        let empty = Sequence::new(
            "empty",
            "Empty",
            "christmas",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let page = rank_sequences(
            &[empty],
            &buyer,
            &RankingQuery::default(),
            &RankingConfig::default(),
        );
        assert_eq!(page.sequences[0].compatibility_score, 0);
        assert!(page.sequences[0].best_profile_id.is_none());
        assert!(page.sequences[0].breakdown.is_none());
    }

    #[test]
    fn test_ranked_sequence_json_shape() {
        let buyer = BuyerHardwareProfile::new(1000).with_prop("Arch", 1);
        let page = rank_sequences(
            &fixture()[..1],
            &buyer,
            &RankingQuery::default(),
            &RankingConfig::default(),
        );
        let json = serde_json::to_value(&page).unwrap();
        let first = &json["sequences"][0];
        assert_eq!(first["id"], "arch");
        assert_eq!(first["priceCents"], 1200);
        assert_eq!(first["compatibilityScore"], 8);
        assert_eq!(first["isCompatible"], true);
        assert_eq!(first["bestProfileId"], "arch-p");
        assert_eq!(json["pagination"]["totalPages"], 1);
    }
}
