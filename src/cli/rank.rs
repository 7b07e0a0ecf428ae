//! Rank command - order the catalog by fit for a buyer display.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::SequenceCatalog;
use crate::cli::{load_buyer, OutputFormat};
use crate::matching::engine::MatchingEngine;
use crate::matching::ranking::{RankedPage, RankingQuery, SortKey};

/// Helper function to convert price in cents to dollars for display
#[inline]
fn cents_to_dollars(cents: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        cents as f64 / 100.0
    }
}

/// Parse a score threshold, rejecting NaN and infinities
fn parse_min_score(s: &str) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{s}' is not a finite number"))
    }
}

/// Arguments for the rank command
#[derive(Args)]
pub struct RankArgs {
    /// Buyer display profile (JSON with props, pixelCount, difficulty).
    /// Use '-' for stdin
    #[arg(long, required = true)]
    pub buyer: PathBuf,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Only rank sequences in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "compatibility")]
    pub sort: SortKey,

    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Sequences per page (default 20, at most 100)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Drop sequences whose best score is below this value
    #[arg(long, default_value = "0", value_parser = parse_min_score)]
    pub min_score: f64,
}

/// Execute the rank command
///
/// # Errors
///
/// Returns an error if the buyer profile or catalog cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: RankArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let buyer = load_buyer(&args.buyer)?;
    let catalog = SequenceCatalog::load(args.catalog.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} sequences", catalog.len());
    }

    let query = RankingQuery {
        category: args.category.clone(),
        sort: args.sort,
        page: args.page,
        limit: args.limit,
        min_compatibility_score: args.min_score,
    };

    let engine = MatchingEngine::new(&catalog);
    let page = engine.rank(&buyer, &query);

    match format {
        OutputFormat::Text => print_text(&page, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
        OutputFormat::Tsv => print_tsv(&page),
    }

    Ok(())
}

fn print_text(page: &RankedPage, verbose: bool) {
    let p = &page.pagination;
    println!(
        "Ranked Sequences ({} matching, page {} of {})\n",
        p.total,
        p.page,
        p.total_pages.max(1)
    );

    if page.sequences.is_empty() {
        println!("No sequences matched.");
        return;
    }

    let id_width = page
        .sequences
        .iter()
        .map(|r| r.sequence.id.as_str().len())
        .max()
        .unwrap_or(2)
        .max(2);
    let category_width = page
        .sequences
        .iter()
        .map(|r| r.sequence.category.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let total_width = id_width + category_width + 6 + 9 + 7 + 4;

    println!(
        "{:<id_w$} {:<cat_w$} {:>6} {:>9} {:>7}",
        "ID",
        "Category",
        "Score",
        "Price",
        "Rating",
        id_w = id_width,
        cat_w = category_width,
    );
    println!("{}", "-".repeat(total_width));

    for r in &page.sequences {
        println!(
            "{:<id_w$} {:<cat_w$} {:>6} {:>9} {:>7.1}",
            r.sequence.id.as_str(),
            r.sequence.category,
            r.compatibility_score,
            format!("${:.2}", cents_to_dollars(r.sequence.price_cents)),
            r.sequence.rating,
            id_w = id_width,
            cat_w = category_width,
        );

        if verbose {
            match (&r.best_profile_id, &r.breakdown) {
                (Some(profile), Some(breakdown)) => println!(
                    "  └─ best profile {}: {} prop match(es), pixel difference {:.1}%{}",
                    profile,
                    breakdown.prop_matches.len(),
                    breakdown.pixel_proximity * 100.0,
                    if breakdown.difficulty_mismatch {
                        ", difficulty mismatch"
                    } else {
                        ""
                    }
                ),
                _ => println!("  └─ no compatibility profiles"),
            }
        }
    }
}

fn print_tsv(page: &RankedPage) {
    println!("sequence_id\ttitle\tcategory\tscore\tis_compatible\tbest_profile\tprice_cents\trating\tdownloads");
    for r in &page.sequences {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            r.sequence.id,
            r.sequence.title,
            r.sequence.category,
            r.compatibility_score,
            r.is_compatible,
            r.best_profile_id
                .as_ref()
                .map_or_else(String::new, ToString::to_string),
            r.sequence.price_cents,
            r.sequence.rating,
            r.sequence.download_count,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_min_score() {
        assert_eq!(parse_min_score("2.5"), Ok(2.5));
        assert_eq!(parse_min_score("-1"), Ok(-1.0));
        assert!(parse_min_score("NaN").is_err());
        assert!(parse_min_score("inf").is_err());
        assert!(parse_min_score("-infinity").is_err());
        assert!(parse_min_score("high").is_err());
    }
}
