use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::SequenceCatalog;
use crate::cli::OutputFormat;
use crate::core::sequence::Sequence;
use crate::core::types::SequenceId;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all sequences in the catalog
    List {
        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Filter by category (e.g., "halloween")
        #[arg(long)]
        category: Option<String>,
    },

    /// Show details of a specific sequence
    Show {
        /// Sequence ID
        #[arg(required = true)]
        id: String,

        /// Path to custom catalog file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to custom catalog file to export (defaults to embedded)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

/// Execute a catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the sequence is not
/// found, or the export file cannot be written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog, category } => {
            run_list(catalog, category.as_deref(), format, verbose)
        }
        CatalogCommands::Show { id, catalog } => run_show(&id, catalog, format),
        CatalogCommands::Export { output, catalog } => run_export(output, catalog),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    category_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = SequenceCatalog::load(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} sequences", catalog.len());
    }

    let filtered: Vec<&Sequence> = match category_filter {
        Some(category) => catalog.in_category(category),
        None => catalog.sequences.iter().collect(),
    };

    match format {
        OutputFormat::Text => {
            let id_width = filtered
                .iter()
                .map(|s| s.id.as_str().len())
                .max()
                .unwrap_or(2)
                .max(2);
            let title_width = filtered
                .iter()
                .map(|s| s.title.chars().count().min(35))
                .max()
                .unwrap_or(5)
                .max(5);
            let category_width = filtered
                .iter()
                .map(|s| s.category.len())
                .max()
                .unwrap_or(8)
                .max(8);

            let total_width = id_width + title_width + category_width + 8 + 8 + 4;

            println!("Sequence Catalog ({} sequences)\n", filtered.len());
            println!(
                "{:<id_w$} {:<title_w$} {:<cat_w$} {:>8} {:>8}",
                "ID",
                "Title",
                "Category",
                "Price",
                "Profiles",
                id_w = id_width,
                title_w = title_width,
                cat_w = category_width,
            );
            println!("{}", "-".repeat(total_width));

            for s in &filtered {
                println!(
                    "{:<id_w$} {:<title_w$} {:<cat_w$} {:>8} {:>8}",
                    s.id.as_str(),
                    truncate(&s.title, title_width),
                    s.category,
                    s.price_cents,
                    s.profiles.len(),
                    id_w = id_width,
                    title_w = title_width,
                    cat_w = category_width,
                );
                if verbose {
                    println!(
                        "  └─ rating {:.1}, {} downloads, listed {}",
                        s.rating,
                        s.download_count,
                        s.created_at.format("%Y-%m-%d")
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&filtered)?);
        }
        OutputFormat::Tsv => {
            println!("id\ttitle\tcategory\tprice_cents\trating\tdownloads\tprofiles");
            for s in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    s.id,
                    s.title,
                    s.category,
                    s.price_cents,
                    s.rating,
                    s.download_count,
                    s.profiles.len()
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = SequenceCatalog::load(catalog_path.as_deref())?;

    let sequence = catalog
        .get(&SequenceId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Sequence '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Sequence: {}\n", sequence.title);
            println!("ID:        {}", sequence.id);
            println!("Category:  {}", sequence.category);
            if !sequence.seller.is_empty() {
                println!("Seller:    {}", sequence.seller);
            }
            println!("Price:     {} cents", sequence.price_cents);
            println!("Rating:    {:.1}", sequence.rating);
            println!("Downloads: {}", sequence.download_count);
            println!("Listed:    {}", sequence.created_at.to_rfc3339());

            if let Some(desc) = &sequence.description {
                println!("\nDescription: {desc}");
            }

            if sequence.profiles.is_empty() {
                println!("\nNo compatibility profiles listed.");
            } else {
                println!("\nProfiles:");
                println!(
                    "{:<22} {:<18} {:>6} {:>10} Difficulty",
                    "ID", "Prop", "Count", "Pixels"
                );
                println!("{}", "-".repeat(72));
                for p in &sequence.profiles {
                    println!(
                        "{:<22} {:<18} {:>6} {:>10} {}",
                        p.id.0,
                        truncate(&p.prop_name, 18),
                        p.prop_count,
                        p.pixel_count,
                        p.difficulty.map_or_else(|| "-".to_string(), |d| d.to_string())
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sequence)?);
        }
        OutputFormat::Tsv => {
            println!("profile_id\tprop_name\tprop_count\tpixel_count\tdifficulty");
            for p in &sequence.profiles {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    p.id,
                    p.prop_name,
                    p.prop_count,
                    p.pixel_count,
                    p.difficulty.map_or_else(String::new, |d| d.to_string())
                );
            }
        }
    }

    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn run_export(output: PathBuf, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = SequenceCatalog::load(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(&output, json)?;

    println!(
        "Exported {} sequences to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}
