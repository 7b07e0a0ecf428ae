//! Command-line interface for sequence-fit.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **score**: Score one sequence (or a standalone profile) against a buyer display
//! - **rank**: Rank the catalog for a buyer display
//! - **catalog**: List, show, or export sequences from the catalog
//! - **serve**: Start the JSON web API
//!
//! ## Usage
//!
//! ```text
//! # Score a catalog sequence
//! sequence-fit score --buyer my_display.json --sequence thriller-full-house
//!
//! # Best Halloween matches, JSON for scripting
//! sequence-fit rank --buyer my_display.json --category halloween --format json
//!
//! # Start the API
//! sequence-fit serve --port 8080
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::profile::BuyerHardwareProfile;
use crate::utils::validation::validate_buyer_profile;

pub mod catalog;
pub mod rank;
pub mod score;

#[derive(Parser)]
#[command(name = "sequence-fit")]
#[command(version)]
#[command(about = "Score LED light sequences against your display hardware")]
#[command(
    long_about = "sequence-fit matches a buyer's display (props, pixel count, skill level) against the compatibility profiles of light sequences.\n\nIt reports:\n- Per-profile scores with a breakdown of prop, pixel and difficulty contributions\n- The best profile for each sequence\n- A ranked, filtered listing of the catalog"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a sequence against a buyer display
    Score(score::ScoreArgs),

    /// Rank catalog sequences for a buyer display
    Rank(rank::RankArgs),

    /// Inspect the sequence catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Path to custom catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Read and validate a buyer profile from a JSON file, or stdin when the path is `-`
fn load_buyer(path: &Path) -> anyhow::Result<BuyerHardwareProfile> {
    use std::io::{self, Read};

    let content = if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read buyer profile {}: {e}", path.display()))?
    };

    let buyer: BuyerHardwareProfile = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid buyer profile {}: {e}", path.display()))?;
    validate_buyer_profile(&buyer)?;

    Ok(buyer)
}
