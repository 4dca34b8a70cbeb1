//! Curated concept list: which Concepticon glosses are body parts and which
//! are physical objects.

use crate::{require_columns, Result, WordlistError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

pub const GLOSS_COLUMN: &str = "CONCEPTICON_GLOSS";
pub const GROUP_COLUMN: &str = "GROUP";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Body,
    Object,
}

impl Group {
    /// Map a `GROUP` cell to a group. Any other tag is not part of the study.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "body" => Some(Group::Body),
            "object" => Some(Group::Object),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptGroup {
    pub gloss: String,
    pub group: Group,
}

#[derive(Debug, Deserialize)]
struct ConceptRow {
    #[serde(rename = "CONCEPTICON_GLOSS", default)]
    gloss: String,
    #[serde(rename = "GROUP", default)]
    group: String,
}

/// The body-part and object glosses of one run. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ConceptList {
    entries: Vec<ConceptGroup>,
    bodyparts: BTreeSet<String>,
    objects: BTreeSet<String>,
}

impl ConceptList {
    pub fn new(entries: impl IntoIterator<Item = ConceptGroup>) -> Self {
        let mut list = ConceptList::default();
        for entry in entries {
            list.push(entry);
        }
        list
    }

    fn push(&mut self, entry: ConceptGroup) {
        let fresh = match entry.group {
            Group::Body => self.bodyparts.insert(entry.gloss.clone()),
            Group::Object => self.objects.insert(entry.gloss.clone()),
        };
        if fresh {
            self.entries.push(entry);
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| WordlistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, path)
    }

    /// Parse a tab-separated concept list. `origin` is only used in errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| WordlistError::csv(origin, e))?
            .clone();
        require_columns(origin, &headers, &[GLOSS_COLUMN, GROUP_COLUMN])?;

        let mut list = ConceptList::default();
        for row in rdr.deserialize::<ConceptRow>() {
            let row = row.map_err(|e| WordlistError::csv(origin, e))?;
            let gloss = row.gloss.trim();
            if gloss.is_empty() {
                continue;
            }
            match Group::from_tag(&row.group) {
                Some(group) => list.push(ConceptGroup {
                    gloss: gloss.to_string(),
                    group,
                }),
                None => tracing::debug!(gloss, group = %row.group, "concept outside study groups"),
            }
        }

        tracing::info!(
            bodyparts = list.bodyparts.len(),
            objects = list.objects.len(),
            "loaded concept list"
        );
        Ok(list)
    }

    pub fn entries(&self) -> &[ConceptGroup] {
        &self.entries
    }

    pub fn bodyparts(&self) -> &BTreeSet<String> {
        &self.bodyparts
    }

    pub fn objects(&self) -> &BTreeSet<String> {
        &self.objects
    }

    pub fn is_bodypart(&self, gloss: &str) -> bool {
        self.bodyparts.contains(gloss)
    }

    pub fn is_object(&self, gloss: &str) -> bool {
        self.objects.contains(gloss)
    }

    /// Whitelist membership: body part or object.
    pub fn contains(&self, gloss: &str) -> bool {
        self.is_bodypart(gloss) || self.is_object(gloss)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TSV: &str = "ID\tCONCEPTICON_GLOSS\tGROUP\n\
                       1\tHAND\tbody\n\
                       2\tEYE\tbody\n\
                       3\tKNIFE\tobject\n\
                       4\tRUN\taction\n\
                       5\t\tbody\n\
                       6\tHAND\tbody\n";

    #[test]
    fn splits_glosses_by_group_tag() {
        let list = ConceptList::from_reader(TSV.as_bytes(), Path::new("concepts.tsv")).unwrap();
        assert!(list.is_bodypart("HAND"));
        assert!(list.is_bodypart("EYE"));
        assert!(list.is_object("KNIFE"));
        assert!(!list.contains("RUN"));
        assert_eq!(list.entries().len(), 3);
    }

    #[test]
    fn missing_group_column_is_reported() {
        let err = ConceptList::from_reader(
            "ID\tCONCEPTICON_GLOSS\n1\tHAND\n".as_bytes(),
            Path::new("concepts.tsv"),
        )
        .unwrap_err();
        assert!(matches!(err, WordlistError::MissingColumn { ref column, .. } if column == "GROUP"));
    }
}
