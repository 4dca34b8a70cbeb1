//! Wordlist ingestion for the body-object colexification dataset
//!
//! Reads the three kinds of input the pipeline consumes:
//! - the curated concept list (TSV, `CONCEPTICON_GLOSS` + `GROUP`),
//! - the dataset catalog (`lexibank.csv`, one row per source dataset),
//! - CLDF wordlist directories (`languages.csv`, `forms.csv`, `parameters.csv`
//!   and `cldf-metadata.json`).
//!
//! Nothing here interprets the data beyond parsing it into typed records; the
//! filtering and aggregation live in `bodyobject-colex`.

pub mod catalog;
pub mod cldf;
pub mod concepts;

pub use catalog::*;
pub use cldf::*;
pub use concepts::*;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum WordlistError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("invalid metadata in {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing column `{column}` in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },
}

impl WordlistError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Fail with `MissingColumn` unless every named column is in the header row.
pub(crate) fn require_columns(
    path: &std::path::Path,
    headers: &csv::StringRecord,
    columns: &[&str],
) -> Result<()> {
    for column in columns {
        if !headers.iter().any(|h| h == *column) {
            return Err(WordlistError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, WordlistError>;
