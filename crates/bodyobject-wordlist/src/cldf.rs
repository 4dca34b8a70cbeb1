//! CLDF wordlist reader.
//!
//! A source dataset is a directory holding `cldf-metadata.json` next to its
//! `LanguageTable`, `ParameterTable` and `FormTable` CSV files. Table file names
//! are taken from the metadata when it declares them, otherwise the CLDF
//! defaults (`languages.csv`, `parameters.csv`, `forms.csv`) are used.

use crate::{require_columns, Result, WordlistError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = "cldf-metadata.json";

const TERMS: &str = "http://cldf.clld.org/v1.0/terms.rdf#";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Glottocode", default)]
    pub glottocode: Option<String>,
    #[serde(rename = "Latitude", default, deserialize_with = "csv::invalid_option")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude", default, deserialize_with = "csv::invalid_option")]
    pub longitude: Option<f64>,
    #[serde(rename = "Subgroup", default)]
    pub subgroup: Option<String>,
    #[serde(rename = "Family", default)]
    pub family: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Concepticon_Gloss", default)]
    pub concepticon_gloss: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Parameter_ID")]
    pub parameter_id: String,
    #[serde(rename = "Form", default)]
    pub form: String,
    #[serde(rename = "Segments", default)]
    pub segments: Option<String>,
}

impl FormRecord {
    pub fn has_sounds(&self) -> bool {
        self.segments
            .as_deref()
            .map_or(false, |s| !s.trim().is_empty())
    }
}

/// Per-language counts derived from the form table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageStats {
    /// Distinct Concepticon glosses the language has forms for.
    pub concepts: usize,
    pub forms: usize,
    pub forms_with_sounds: usize,
}

/// Dataset-level counts reported in the contribution table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordlistSummary {
    pub glottocodes: usize,
    pub doculects: usize,
    pub concepts: usize,
    pub senses: usize,
    pub forms: usize,
}

/// One loaded source dataset.
#[derive(Debug, Clone)]
pub struct Wordlist {
    pub id: String,
    pub title: String,
    pub citation: String,
    pub languages: Vec<LanguageRecord>,
    pub parameters: Vec<ParameterRecord>,
    pub forms: Vec<FormRecord>,
    glosses: HashMap<String, String>,
}

impl Wordlist {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        citation: impl Into<String>,
        languages: Vec<LanguageRecord>,
        parameters: Vec<ParameterRecord>,
        forms: Vec<FormRecord>,
    ) -> Self {
        let glosses = parameters
            .iter()
            .filter_map(|p| {
                let gloss = p.concepticon_gloss.as_deref()?.trim();
                (!gloss.is_empty()).then(|| (p.id.clone(), gloss.to_string()))
            })
            .collect();
        Self {
            id: id.into(),
            title: title.into(),
            citation: citation.into(),
            languages,
            parameters,
            forms,
            glosses,
        }
    }

    /// Load `<raw_dir>/<dataset_id>/cldf`.
    pub fn from_dataset_dir(raw_dir: &Path, dataset_id: &str) -> Result<Self> {
        Self::load(&raw_dir.join(dataset_id).join("cldf"), dataset_id)
    }

    /// Load a CLDF directory. `fallback_id` is used when the metadata carries
    /// no `rdf:ID`.
    pub fn load(cldf_dir: &Path, fallback_id: &str) -> Result<Self> {
        let metadata_path = cldf_dir.join(METADATA_FILE);
        let text = std::fs::read_to_string(&metadata_path).map_err(|source| WordlistError::Io {
            path: metadata_path.clone(),
            source,
        })?;
        let metadata: JsonValue =
            serde_json::from_str(&text).map_err(|source| WordlistError::Metadata {
                path: metadata_path.clone(),
                source,
            })?;

        let prop = |key: &str| {
            metadata
                .get(key)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let id = match prop("rdf:ID") {
            id if id.is_empty() => fallback_id.to_string(),
            id => id,
        };

        let languages_path = table_path(cldf_dir, &metadata, "LanguageTable", "languages.csv");
        let parameters_path = table_path(cldf_dir, &metadata, "ParameterTable", "parameters.csv");
        let forms_path = table_path(cldf_dir, &metadata, "FormTable", "forms.csv");

        let languages: Vec<LanguageRecord> = read_table(&languages_path, &["ID"])?;
        let parameters: Vec<ParameterRecord> = read_table(&parameters_path, &["ID"])?;
        let forms: Vec<FormRecord> =
            read_table(&forms_path, &["ID", "Language_ID", "Parameter_ID"])?;

        tracing::debug!(
            dataset = %id,
            languages = languages.len(),
            parameters = parameters.len(),
            forms = forms.len(),
            "loaded wordlist"
        );

        Ok(Self::new(
            id,
            prop("dc:title"),
            prop("dc:bibliographicCitation"),
            languages,
            parameters,
            forms,
        ))
    }

    /// Concepticon gloss linked to a parameter, if any.
    pub fn concept_gloss(&self, parameter_id: &str) -> Option<&str> {
        self.glosses.get(parameter_id).map(String::as_str)
    }

    /// Counts per language id. Languages without forms are present with zeros.
    pub fn language_stats(&self) -> HashMap<String, LanguageStats> {
        let mut concepts: HashMap<&str, BTreeSet<&str>> = HashMap::new();
        let mut stats: HashMap<String, LanguageStats> = self
            .languages
            .iter()
            .map(|l| (l.id.clone(), LanguageStats::default()))
            .collect();

        for form in &self.forms {
            let entry = stats.entry(form.language_id.clone()).or_default();
            entry.forms += 1;
            if form.has_sounds() {
                entry.forms_with_sounds += 1;
            }
            if let Some(gloss) = self.concept_gloss(&form.parameter_id) {
                concepts.entry(&form.language_id).or_default().insert(gloss);
            }
        }
        for (language_id, glosses) in concepts {
            if let Some(entry) = stats.get_mut(language_id) {
                entry.concepts = glosses.len();
            }
        }
        stats
    }

    pub fn summary(&self) -> WordlistSummary {
        let glottocodes: BTreeSet<&str> = self
            .languages
            .iter()
            .filter_map(|l| l.glottocode.as_deref())
            .filter(|g| !g.trim().is_empty())
            .collect();
        let concepts: BTreeSet<&str> = self.glosses.values().map(String::as_str).collect();
        WordlistSummary {
            glottocodes: glottocodes.len(),
            doculects: self.languages.len(),
            concepts: concepts.len(),
            senses: self.parameters.len(),
            forms: self.forms.len(),
        }
    }
}

fn table_path(cldf_dir: &Path, metadata: &JsonValue, component: &str, default: &str) -> PathBuf {
    let conforms_to = format!("{TERMS}{component}");
    let declared = metadata
        .get("tables")
        .and_then(JsonValue::as_array)
        .into_iter()
        .flatten()
        .find(|t| {
            t.get("dc:conformsTo").and_then(JsonValue::as_str) == Some(conforms_to.as_str())
        })
        .and_then(|t| t.get("url"))
        .and_then(JsonValue::as_str);
    cldf_dir.join(declared.unwrap_or(default))
}

fn read_table<T: serde::de::DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| WordlistError::csv(path, e))?;
    let headers = rdr.headers().map_err(|e| WordlistError::csv(path, e))?.clone();
    require_columns(path, &headers, required)?;

    rdr.deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| WordlistError::csv(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(id: &str, glottocode: Option<&str>) -> LanguageRecord {
        LanguageRecord {
            id: id.to_string(),
            name: Some(id.to_string()),
            glottocode: glottocode.map(str::to_string),
            latitude: Some(1.0),
            longitude: Some(2.0),
            subgroup: None,
            family: None,
        }
    }

    fn param(id: &str, gloss: Option<&str>) -> ParameterRecord {
        ParameterRecord {
            id: id.to_string(),
            name: None,
            concepticon_gloss: gloss.map(str::to_string),
        }
    }

    fn form(id: &str, language: &str, parameter: &str, segments: Option<&str>) -> FormRecord {
        FormRecord {
            id: id.to_string(),
            language_id: language.to_string(),
            parameter_id: parameter.to_string(),
            form: "x".to_string(),
            segments: segments.map(str::to_string),
        }
    }

    #[test]
    fn language_stats_count_linked_concepts_only() {
        let wl = Wordlist::new(
            "ds",
            "",
            "",
            vec![lang("a", Some("abcd1234")), lang("b", None)],
            vec![param("1", Some("HAND")), param("2", Some("")), param("3", Some("EYE"))],
            vec![
                form("f1", "a", "1", Some("x")),
                form("f2", "a", "1", None),
                form("f3", "a", "2", Some("")),
                form("f4", "a", "3", None),
            ],
        );
        let stats = wl.language_stats();
        assert_eq!(
            stats["a"],
            LanguageStats {
                concepts: 2,
                forms: 4,
                forms_with_sounds: 1
            }
        );
        assert_eq!(stats["b"], LanguageStats::default());
    }

    #[test]
    fn summary_counts_distinct_glottocodes_and_concepts() {
        let wl = Wordlist::new(
            "ds",
            "",
            "",
            vec![
                lang("a", Some("abcd1234")),
                lang("b", Some("abcd1234")),
                lang("c", Some(" ")),
            ],
            vec![param("1", Some("HAND")), param("2", Some("HAND")), param("3", None)],
            vec![form("f1", "a", "1", None)],
        );
        assert_eq!(
            wl.summary(),
            WordlistSummary {
                glottocodes: 1,
                doculects: 3,
                concepts: 1,
                senses: 3,
                forms: 1
            }
        );
    }
}
