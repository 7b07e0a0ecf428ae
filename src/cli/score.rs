//! Score command - score one sequence against a buyer display.
//!
//! Scores every compatibility profile of a catalog sequence, or a single
//! standalone profile read from a JSON file.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::store::SequenceCatalog;
use crate::cli::{load_buyer, OutputFormat};
use crate::core::profile::SequenceHardwareProfile;
use crate::matching::engine::{MatchingEngine, ProfileScore, SequenceMatch};
use crate::matching::scoring::CompatibilityScore;
use crate::utils::validation::validate_sequence_id;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Buyer display profile (JSON with props, pixelCount, difficulty).
    /// Use '-' for stdin
    #[arg(long, required = true)]
    pub buyer: PathBuf,

    /// Catalog sequence ID to score
    #[arg(long, required_unless_present = "profile", conflicts_with = "profile")]
    pub sequence: Option<String>,

    /// Standalone sequence profile JSON (propName, propCount, pixelCount, difficulty;
    /// id is optional)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Path to custom catalog file (only used with --sequence)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if inputs cannot be read, the sequence is unknown, or it
/// has no compatibility profiles.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let buyer = load_buyer(&args.buyer)?;

    if verbose {
        eprintln!(
            "Buyer: {} props, {} pixels, difficulty {}",
            buyer.props.len(),
            buyer.pixel_count,
            buyer
                .difficulty
                .map_or_else(|| "unspecified".to_string(), |d| d.to_string()),
        );
    }

    if let Some(profile_path) = &args.profile {
        let content = std::fs::read_to_string(profile_path)?;
        let profile: SequenceHardwareProfile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid profile {}: {e}", profile_path.display()))?;
        let score = ProfileScore {
            profile_id: profile.id.clone(),
            score: CompatibilityScore::calculate(&buyer, &profile),
        };

        match format {
            OutputFormat::Text => print_text_profile(&score, ""),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&score)?),
            OutputFormat::Tsv => {
                print_tsv_header();
                print_tsv_row("-", &score);
            }
        }
        return Ok(());
    }

    let sequence = args
        .sequence
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Either --sequence or --profile is required"))?;
    let sequence_id = validate_sequence_id(sequence)?;

    let catalog = SequenceCatalog::load(args.catalog.as_deref())?;
    if verbose {
        eprintln!("Loaded catalog with {} sequences", catalog.len());
    }

    let engine = MatchingEngine::new(&catalog);
    let result = engine.score_by_id(&buyer, &sequence_id)?;

    match format {
        OutputFormat::Text => print_text_result(&catalog, &result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => {
            print_tsv_header();
            for score in &result.all_scores {
                print_tsv_row(result.sequence_id.as_str(), score);
            }
        }
    }

    Ok(())
}

fn print_text_result(catalog: &SequenceCatalog, result: &SequenceMatch) {
    let title = catalog
        .get(&result.sequence_id)
        .map_or(result.sequence_id.as_str(), |s| s.title.as_str());

    println!("Compatibility: {title}");
    println!("{}", "=".repeat(60));
    println!(
        "Best profile: {} (score {})",
        result.best_score.profile_id, result.best_score.score.total_score
    );

    for score in &result.all_scores {
        let marker = if score.profile_id == result.best_score.profile_id {
            " *"
        } else {
            ""
        };
        println!("\n{}", "─".repeat(60));
        print_text_profile(score, marker);
    }
}

fn print_text_profile(score: &ProfileScore, marker: &str) {
    let s = &score.score;
    println!("Profile {}{marker}", score.profile_id);
    println!(
        "  Total: {} = {} props + {} pixels {:+} difficulty",
        s.total_score, s.prop_score, s.pixel_score, s.difficulty_penalty
    );
    println!(
        "  Pixel difference: {:.1}%",
        s.breakdown.pixel_proximity * 100.0
    );

    if s.breakdown.prop_matches.is_empty() {
        println!("  Prop matches: none");
    } else {
        println!("  Prop matches:");
        for m in &s.breakdown.prop_matches {
            println!("  - {} ({}, +{})", m.name, m.kind, m.score);
        }
    }

    if s.breakdown.difficulty_mismatch {
        println!("  Warning: advanced sequence for a beginner setup");
    }
}

fn print_tsv_header() {
    println!("sequence_id\tprofile_id\ttotal\tprop_score\tpixel_score\tdifficulty_penalty\tpixel_proximity");
}

fn print_tsv_row(sequence_id: &str, score: &ProfileScore) {
    let s = &score.score;
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{:.4}",
        sequence_id,
        score.profile_id,
        s.total_score,
        s.prop_score,
        s.pixel_score,
        s.difficulty_penalty,
        s.breakdown.pixel_proximity,
    );
}
