//! Table writer.

use crate::schema::{self, TableSpec};
use crate::{check_tables, CldfError, Result};
use bodyobject_colex::CldfTables;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATASET_ID: &str = "tjukabodyobject";

/// Writes one dataset into a CLDF directory.
#[derive(Debug, Clone)]
pub struct CldfWriter {
    dir: PathBuf,
    dataset_id: String,
}

impl CldfWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            dataset_id: DEFAULT_DATASET_ID.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sort, check and write every table. Returns the written paths, metadata
    /// first.
    pub fn write(&self, tables: &CldfTables) -> Result<Vec<PathBuf>> {
        let mut tables = tables.clone();
        tables.sort();
        check_tables(&tables)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| CldfError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut specs: Vec<&TableSpec> = vec![
            &schema::LANGUAGES,
            &schema::PARAMETERS,
            &schema::CODES,
            &schema::VALUES,
        ];
        if tables.examples.is_some() {
            specs.push(&schema::EXAMPLES);
        }
        specs.push(&schema::CONTRIBUTIONS);
        specs.push(&schema::COLLECTIONS);

        let metadata_path = self.dir.join("cldf-metadata.json");
        let metadata = schema::metadata_json(&self.dataset_id, &specs);
        let mut text = serde_json::to_string_pretty(&metadata)?;
        text.push('\n');
        std::fs::write(&metadata_path, text).map_err(|source| CldfError::Io {
            path: metadata_path.clone(),
            source,
        })?;

        let mut written = vec![metadata_path];
        written.push(self.write_table(&schema::LANGUAGES, &tables.languages)?);
        written.push(self.write_table(&schema::PARAMETERS, &tables.parameters)?);
        written.push(self.write_table(&schema::CODES, &tables.codes)?);
        written.push(self.write_table(&schema::VALUES, &tables.values)?);
        if let Some(examples) = &tables.examples {
            written.push(self.write_table(&schema::EXAMPLES, examples)?);
        }
        written.push(self.write_table(&schema::CONTRIBUTIONS, &tables.contributions)?);
        written.push(self.write_table(&schema::COLLECTIONS, &tables.collections)?);

        tracing::info!(dir = %self.dir.display(), files = written.len(), "wrote CLDF dataset");
        Ok(written)
    }

    /// Header from the table schema, then one serialized record per row. The header
    /// is written even for an empty table.
    fn write_table<T: Serialize>(&self, spec: &TableSpec, rows: &[T]) -> Result<PathBuf> {
        let path = self.dir.join(spec.url);
        let csv_err = |source| CldfError::Csv {
            path: path.clone(),
            source,
        };

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(csv_err)?;
        wtr.write_record(spec.header()).map_err(csv_err)?;
        for row in rows {
            wtr.serialize(row).map_err(csv_err)?;
        }
        wtr.flush().map_err(|source| CldfError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(table = spec.url, rows = rows.len(), "wrote table");
        Ok(path)
    }
}
