//! Referential integrity of a table set, in memory or re-read from disk.

use crate::schema::{self, TableSpec};
use crate::{CldfError, Result};
use bodyobject_colex::CldfTables;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Rows of one table as column → cell maps.
pub type Rows = Vec<HashMap<String, String>>;

fn ensure_unique<'a>(table: &str, ids: impl IntoIterator<Item = &'a str>) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(CldfError::EmptyId {
                table: table.to_string(),
            });
        }
        if !seen.insert(id) {
            return Err(CldfError::DuplicateId {
                table: table.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(seen)
}

fn ensure_refs<'a>(
    table: &str,
    column: &str,
    refs: impl IntoIterator<Item = &'a str>,
    targets: &HashSet<&str>,
) -> Result<()> {
    for id in refs {
        if !targets.contains(id) {
            return Err(CldfError::DanglingReference {
                table: table.to_string(),
                column: column.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Check primary keys and every foreign key of an in-memory table set.
pub fn check_tables(tables: &CldfTables) -> Result<()> {
    let languages = ensure_unique("languages.csv", tables.languages.iter().map(|l| l.id.as_str()))?;
    let parameters = ensure_unique("parameters.csv", tables.parameters.iter().map(|p| p.id.as_str()))?;
    let codes = ensure_unique("codes.csv", tables.codes.iter().map(|c| c.id.as_str()))?;
    ensure_unique("values.csv", tables.values.iter().map(|v| v.id.as_str()))?;
    let contributions = ensure_unique(
        "contributions.csv",
        tables.contributions.iter().map(|c| c.id.as_str()),
    )?;
    let collections = ensure_unique(
        "collections.csv",
        tables.collections.iter().map(|c| c.id.as_str()),
    )?;

    ensure_refs(
        "languages.csv",
        "Dataset",
        tables.languages.iter().map(|l| l.dataset.as_str()),
        &contributions,
    )?;
    ensure_refs(
        "codes.csv",
        "Parameter_ID",
        tables.codes.iter().map(|c| c.parameter_id.as_str()),
        &parameters,
    )?;
    ensure_refs(
        "values.csv",
        "Language_ID",
        tables.values.iter().map(|v| v.language_id.as_str()),
        &languages,
    )?;
    ensure_refs(
        "values.csv",
        "Parameter_ID",
        tables.values.iter().map(|v| v.parameter_id.as_str()),
        &parameters,
    )?;
    ensure_refs(
        "values.csv",
        "Code_ID",
        tables.values.iter().map(|v| v.code_id.as_str()),
        &codes,
    )?;
    ensure_refs(
        "contributions.csv",
        "Collection_IDs",
        tables
            .contributions
            .iter()
            .flat_map(|c| c.collection_ids.iter().map(String::as_str)),
        &collections,
    )?;

    match &tables.examples {
        Some(examples) => {
            let example_ids = ensure_unique("examples.csv", examples.iter().map(|e| e.id.as_str()))?;
            ensure_refs(
                "examples.csv",
                "Language_ID",
                examples.iter().map(|e| e.language_id.as_str()),
                &languages,
            )?;
            ensure_refs(
                "values.csv",
                "Example_IDs",
                tables
                    .values
                    .iter()
                    .flat_map(|v| v.example_ids.iter().map(String::as_str)),
                &example_ids,
            )?;
        }
        None => {
            if let Some(v) = tables.values.iter().find(|v| !v.example_ids.is_empty()) {
                return Err(CldfError::DanglingReference {
                    table: "values.csv".into(),
                    column: "Example_IDs".into(),
                    id: v.example_ids[0].clone(),
                });
            }
        }
    }
    Ok(())
}

/// What `check_dir` found in an emitted dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub rows: BTreeMap<String, usize>,
    /// Lowest number of determined values over all languages.
    pub min_determined: Option<usize>,
}

fn read_rows(path: &Path) -> Result<Rows> {
    let mut rdr = csv::Reader::from_path(path).map_err(|source| CldfError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    rdr.deserialize()
        .collect::<std::result::Result<Rows, _>>()
        .map_err(|source| CldfError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or_default()
}

fn split<'a>(value: &'a str, separator: Option<&str>) -> Vec<&'a str> {
    match separator {
        Some(sep) => value.split(sep).filter(|s| !s.is_empty()).collect(),
        None if value.is_empty() => Vec::new(),
        None => vec![value],
    }
}

/// Re-read an emitted directory and verify keys, foreign keys and the
/// per-language determined-value minimum.
pub fn check_dir(dir: &Path, min_values: usize) -> Result<CheckReport> {
    let mut specs: Vec<&TableSpec> = vec![
        &schema::LANGUAGES,
        &schema::PARAMETERS,
        &schema::CODES,
        &schema::VALUES,
        &schema::CONTRIBUTIONS,
        &schema::COLLECTIONS,
    ];
    if dir.join(schema::EXAMPLES.url).is_file() {
        specs.push(&schema::EXAMPLES);
    }

    let mut loaded: BTreeMap<&str, Rows> = BTreeMap::new();
    for spec in &specs {
        loaded.insert(spec.url, read_rows(&dir.join(spec.url))?);
    }

    let mut ids: HashMap<&str, HashSet<&str>> = HashMap::new();
    for (url, rows) in &loaded {
        ids.insert(*url, ensure_unique(url, rows.iter().map(|r| cell(r, "ID")))?);
    }

    let empty = HashSet::new();
    for spec in &specs {
        let rows = &loaded[spec.url];
        for fk in spec.foreign_keys {
            let separator = spec
                .columns
                .iter()
                .find(|c| c.name == fk.column)
                .and_then(|c| c.separator);
            let targets = ids.get(fk.table).unwrap_or(&empty);
            ensure_refs(
                spec.url,
                fk.column,
                rows.iter().flat_map(|r| split(cell(r, fk.column), separator)),
                targets,
            )?;
        }
    }
    if let Some(example_ids) = ids.get(schema::EXAMPLES.url) {
        ensure_refs(
            schema::VALUES.url,
            "Example_IDs",
            loaded[schema::VALUES.url]
                .iter()
                .flat_map(|r| split(cell(r, "Example_IDs"), Some(";"))),
            example_ids,
        )?;
    }

    let mut determined: HashMap<&str, usize> = HashMap::new();
    for row in &loaded[schema::VALUES.url] {
        if !cell(row, "Value").is_empty() {
            *determined.entry(cell(row, "Language_ID")).or_insert(0) += 1;
        }
    }
    let mut min_determined = None;
    for language in &loaded[schema::LANGUAGES.url] {
        let id = cell(language, "ID");
        let count = determined.get(id).copied().unwrap_or(0);
        if count < min_values {
            return Err(CldfError::SparseLanguage {
                id: id.to_string(),
                determined: count,
                required: min_values,
            });
        }
        min_determined = Some(min_determined.map_or(count, |m: usize| m.min(count)));
    }

    Ok(CheckReport {
        rows: loaded
            .iter()
            .map(|(url, rows)| (url.to_string(), rows.len()))
            .collect(),
        min_determined,
    })
}
