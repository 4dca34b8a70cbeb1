//! `makecldf`: run the pipeline over downloaded datasets and write the tables.

use anyhow::{Context, Result};
use bodyobject_cldf::CldfWriter;
use bodyobject_colex::{Pipeline, PipelineConfig};
use bodyobject_wordlist::{ConceptList, DatasetCatalog};
use colored::Colorize;
use std::path::{Path, PathBuf};

pub const CONCEPT_LIST_FILE: &str = "Tjuka-2022-784.tsv";
pub const CATALOG_FILE: &str = "lexibank.csv";

/// Command-line overrides applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub examples: bool,
    pub top_n: Option<usize>,
    pub min_values: Option<usize>,
    pub min_concepts: Option<usize>,
}

pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::from_path(path)?,
        None => PipelineConfig::default(),
    };
    if overrides.examples {
        config.with_examples = true;
    }
    if let Some(n) = overrides.top_n {
        config.top_n = n;
    }
    if let Some(n) = overrides.min_values {
        config.min_values = n;
    }
    if let Some(n) = overrides.min_concepts {
        config.min_concepts = n;
    }
    config.validate()?;
    Ok(config)
}

pub fn load_catalog(etc_dir: &Path) -> Result<DatasetCatalog> {
    let path = etc_dir.join(CATALOG_FILE);
    DatasetCatalog::from_path(&path).with_context(|| format!("failed to load catalog {}", path.display()))
}

pub fn cmd_makecldf(
    etc_dir: &Path,
    raw_dir: &Path,
    out_dir: &Path,
    config: PipelineConfig,
) -> Result<Vec<PathBuf>> {
    let concepts_path = etc_dir.join(CONCEPT_LIST_FILE);
    let concepts = ConceptList::from_path(&concepts_path)
        .with_context(|| format!("failed to load concept list {}", concepts_path.display()))?;
    let (bodyparts, objects) = (concepts.bodyparts().len(), concepts.objects().len());
    let catalog = load_catalog(etc_dir)?;

    let mut pipeline = Pipeline::new(config, concepts)?;
    let load = pipeline.load_datasets(raw_dir, &catalog);
    let output = pipeline.finish()?;
    let written = CldfWriter::new(out_dir).write(&output.tables)?;

    println!("{}", "CLDF dataset written".green().bold());
    println!("  concepts:  {bodyparts} body parts, {objects} objects");
    println!("  datasets:  {} loaded, {} skipped", load.loaded.len(), load.skipped.len());
    if !load.skipped.is_empty() {
        println!("  {} {}", "skipped:".yellow(), load.skipped.join(", "));
    }
    println!("  languages: {}", output.tables.languages.len());
    println!("  features:  {}", output.tables.parameters.len());
    println!("  values:    {}", output.tables.values.len());
    println!(
        "  dropped:   {} duplicate, {} sparse",
        output.stats.duplicate_languages, output.stats.sparse_languages
    );
    for path in &written {
        println!("  {} {}", "→".cyan(), path.display());
    }
    Ok(written)
}
