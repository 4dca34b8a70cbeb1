//! CLDF StructureDataset output
//!
//! Writes a `CldfTables` set as CSV files plus `cldf-metadata.json`, after
//! sorting every table by ID and checking that no foreign key dangles.

pub mod check;
pub mod schema;
pub mod writer;

pub use check::*;
pub use writer::*;

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CldfError {
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
    #[error("failed to serialize metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("{table}: empty ID")]
    EmptyId { table: String },
    #[error("{table}: duplicate ID `{id}`")]
    DuplicateId { table: String, id: String },
    #[error("{table}.{column} references unknown ID `{id}`")]
    DanglingReference {
        table: String,
        column: String,
        id: String,
    },
    #[error("language `{id}` has {determined} determined values, fewer than {required}")]
    SparseLanguage {
        id: String,
        determined: usize,
        required: usize,
    },
}

pub type Result<T> = std::result::Result<T, CldfError>;
