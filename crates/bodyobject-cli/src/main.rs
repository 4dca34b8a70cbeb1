//! Body-object colexification CLI
//!
//! - `download`: clone or update the catalog's source datasets
//! - `makecldf`: compute colexification features and write CLDF tables
//! - `check`: re-validate an emitted CLDF directory

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod download;
mod makecldf;

#[derive(Parser)]
#[command(name = "bodyobject")]
#[command(
    author,
    version,
    about = "Body-part and object colexifications from Lexibank wordlists"
)]
struct Cli {
    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clone or update every dataset of the collection into the raw directory.
    Download {
        #[arg(long, default_value = "etc")]
        etc_dir: PathBuf,
        #[arg(long, default_value = "raw")]
        raw_dir: PathBuf,
        /// Collection to download.
        #[arg(long, default_value = "ClicsCore")]
        collection: String,
    },

    /// Build the CLDF StructureDataset.
    Makecldf {
        #[arg(long, default_value = "etc")]
        etc_dir: PathBuf,
        #[arg(long, default_value = "raw")]
        raw_dir: PathBuf,
        #[arg(long, default_value = "cldf")]
        out_dir: PathBuf,
        /// JSON config file; flags below override its values.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Attach supporting forms to values and write `examples.csv`.
        #[arg(long)]
        examples: bool,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        min_values: Option<usize>,
        #[arg(long)]
        min_concepts: Option<usize>,
    },

    /// Check keys, foreign keys and the determined-value minimum of emitted tables.
    Check {
        #[arg(long, default_value = "cldf")]
        cldf_dir: PathBuf,
        #[arg(long, default_value_t = 20)]
        min_values: usize,
    },
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Download {
            etc_dir,
            raw_dir,
            collection,
        } => {
            let catalog = makecldf::load_catalog(&etc_dir)?;
            download::cmd_download(&catalog, &collection, &raw_dir)?;
        }
        Commands::Makecldf {
            etc_dir,
            raw_dir,
            out_dir,
            config,
            examples,
            top_n,
            min_values,
            min_concepts,
        } => {
            let overrides = makecldf::Overrides {
                examples,
                top_n,
                min_values,
                min_concepts,
            };
            let config = makecldf::resolve_config(config.as_deref(), &overrides)?;
            makecldf::cmd_makecldf(&etc_dir, &raw_dir, &out_dir, config)?;
        }
        Commands::Check {
            cldf_dir,
            min_values,
        } => {
            let report = bodyobject_cldf::check_dir(&cldf_dir, min_values)
                .map_err(|e| anyhow!("{}: {e}", cldf_dir.display()))?;
            println!("{} {}", "ok".green().bold(), cldf_dir.display());
            for (table, rows) in &report.rows {
                println!("  {table}: {rows} rows");
            }
            if let Some(min) = report.min_determined {
                println!("  fewest determined values per language: {min}");
            }
        }
    }
    Ok(())
}
