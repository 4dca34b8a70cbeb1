//! Dataset catalog (`lexibank.csv`).
//!
//! One row per source dataset. A dataset belongs to a collection when the
//! collection's column holds an `x`. Rows without a Zenodo DOI are not
//! published releases and are ignored.

use crate::{require_columns, Result, WordlistError};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use std::path::Path;

/// A named subset-selection criterion applied across source datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub id: &'static str,
    pub description: &'static str,
}

pub const CLICS_CORE: Collection = Collection {
    id: "ClicsCore",
    description: "Wordlists with large form inventories in which at least 250 concepts can be \
                  linked to the Concepticon",
};

pub const KNOWN_COLLECTIONS: &[Collection] = &[CLICS_CORE];

impl Collection {
    pub fn by_id(id: &str) -> Option<&'static Collection> {
        KNOWN_COLLECTIONS.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    /// Zenodo DOI of the archived release.
    pub zenodo: String,
    /// `owner/name` or a full clone URL.
    pub repository: String,
    /// Release tag to check out; `None` means "track the primary branch".
    pub tag: Option<String>,
    pub collections: BTreeSet<String>,
}

impl CatalogEntry {
    pub fn in_collection(&self, collection: &str) -> bool {
        self.collections.contains(collection)
    }

    pub fn clone_url(&self) -> String {
        let repo = self.repository.trim();
        if repo.starts_with("http://") || repo.starts_with("https://") {
            if repo.ends_with(".git") {
                return repo.to_string();
            }
            return format!("{repo}.git");
        }
        format!("https://github.com/{repo}.git")
    }
}

/// Catalog entries keyed (and therefore deduplicated and sorted) by dataset id.
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl DatasetCatalog {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| WordlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|e| WordlistError::csv(origin, e))?
            .clone();
        require_columns(origin, &headers, &["Dataset", "Zenodo"])?;

        let mut catalog = DatasetCatalog::default();
        for row in rdr.deserialize::<HashMap<String, String>>() {
            let row = row.map_err(|e| WordlistError::csv(origin, e))?;
            let cell = |key: &str| row.get(key).map(|v| v.trim()).unwrap_or_default();

            let id = cell("Dataset");
            let zenodo = cell("Zenodo");
            if id.is_empty() || zenodo.is_empty() {
                continue;
            }

            let collections = KNOWN_COLLECTIONS
                .iter()
                .filter(|c| cell(c.id) == "x")
                .map(|c| c.id.to_string())
                .collect();
            let repository = match cell("Repository") {
                "" => format!("lexibank/{id}"),
                repo => repo.to_string(),
            };
            let tag = Some(cell("Tag")).filter(|t| !t.is_empty()).map(str::to_string);

            catalog.entries.insert(
                id.to_string(),
                CatalogEntry {
                    id: id.to_string(),
                    zenodo: zenodo.to_string(),
                    repository,
                    tag,
                    collections,
                },
            );
        }
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    /// Sorted ids of the datasets in `collection`, or of every dataset when
    /// no collection is given.
    pub fn dataset_ids(&self, collection: Option<&str>) -> Vec<String> {
        self.entries
            .values()
            .filter(|e| collection.map_or(true, |c| e.in_collection(c)))
            .map(|e| e.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
