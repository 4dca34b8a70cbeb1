//! Records of the emitted structure dataset, plus the admitted source records
//! they are built from.
//!
//! Output records serialize with their CLDF column names so the emitter can
//! hand them to a CSV writer as-is.

use crate::{feature_id, ColexError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

// ============================================================================
// Source side
// ============================================================================

/// A language admitted from a source dataset. `id` is namespaced by dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLanguage {
    pub id: String,
    pub glottocode: Option<String>,
    pub name: String,
    pub dataset_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub subgroup: Option<String>,
    pub family: Option<String>,
    pub concept_count: usize,
    pub form_count: usize,
    pub forms_with_sounds: usize,
}

/// A form whose concept is on the body-part/object whitelist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceForm {
    pub id: String,
    pub language_id: String,
    pub concept_gloss: String,
    pub form: String,
}

/// Dataset-namespaced identifier, e.g. `wold-Swahili`.
pub fn namespaced_id(dataset_id: &str, local_id: &str) -> String {
    format!("{dataset_id}-{local_id}")
}

// ============================================================================
// Ternary value
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColexValue {
    True,
    False,
    Missing,
}

impl ColexValue {
    pub const ALL: [ColexValue; 3] = [ColexValue::True, ColexValue::False, ColexValue::Missing];

    pub fn as_str(self) -> &'static str {
        match self {
            ColexValue::True => "true",
            ColexValue::False => "false",
            ColexValue::Missing => "missing",
        }
    }

    pub fn is_determined(self) -> bool {
        self != ColexValue::Missing
    }
}

impl fmt::Display for ColexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Value` column: the token for determined values, empty for missing ones.
impl Serialize for ColexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_determined() {
            serializer.serialize_some(self.as_str())
        } else {
            serializer.serialize_none()
        }
    }
}

fn non_empty(kind: &'static str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ColexError::EmptyIdentifier { kind });
    }
    Ok(())
}

// ============================================================================
// Output tables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Glottocode")]
    pub glottocode: Option<String>,
    #[serde(rename = "Dataset")]
    pub dataset: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Subgroup")]
    pub subgroup: Option<String>,
    #[serde(rename = "Family")]
    pub family: Option<String>,
    #[serde(rename = "Forms")]
    pub forms: usize,
    #[serde(rename = "FormsWithSounds")]
    pub forms_with_sounds: usize,
    #[serde(rename = "Concepts")]
    pub concepts: usize,
    #[serde(rename = "Incollections")]
    pub incollections: String,
}

impl Language {
    pub fn from_source(lang: &SourceLanguage, collection: &str) -> Result<Self> {
        non_empty("language", &lang.id)?;
        Ok(Self {
            id: lang.id.clone(),
            name: lang.name.clone(),
            glottocode: lang.glottocode.clone(),
            dataset: lang.dataset_id.clone(),
            latitude: lang.latitude,
            longitude: lang.longitude,
            subgroup: lang.subgroup.clone(),
            family: lang.family.clone(),
            forms: lang.form_count,
            forms_with_sounds: lang.forms_with_sounds,
            concepts: lang.concept_count,
            incollections: collection.to_string(),
        })
    }
}

/// One body-part/object colexification feature (ParameterTable row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Bodypart")]
    pub bodypart: String,
    #[serde(rename = "Object")]
    pub object: String,
    /// Number of (language, form) observations that ranked this pair.
    #[serde(rename = "Count")]
    pub count: usize,
}

impl Feature {
    pub fn new(bodypart: &str, object: &str, count: usize) -> Result<Self> {
        if bodypart == object {
            return Err(ColexError::DegenerateFeature {
                gloss: bodypart.to_string(),
            });
        }
        Ok(Self {
            id: feature_id(bodypart, object)?,
            name: format!("Colexification of {bodypart} and {object}"),
            description: format!(
                "Computes if the concepts {bodypart} and {object} are expressed with the same \
                 form in a language (i.e. they are colexified)"
            ),
            bodypart: bodypart.to_string(),
            object: object.to_string(),
            count,
        })
    }

    pub fn code_id(&self, value: ColexValue) -> String {
        format!("{}-{}", self.id, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Code {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Parameter_ID")]
    pub parameter_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl Code {
    pub fn new(feature: &Feature, value: ColexValue) -> Self {
        let name = match value {
            ColexValue::True => format!("colexifies {} and {}", feature.bodypart, feature.object),
            ColexValue::False => format!(
                "does not colexify {} and {}",
                feature.bodypart, feature.object
            ),
            ColexValue::Missing => "missing value".to_string(),
        };
        Self {
            id: feature.code_id(value),
            parameter_id: feature.id.clone(),
            name,
            description: String::new(),
        }
    }
}

fn join_semicolon<S: Serializer>(ids: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ids.join(";"))
}

fn join_space<S: Serializer>(ids: &[String], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&ids.join(" "))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Value {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Parameter_ID")]
    pub parameter_id: String,
    #[serde(rename = "Value")]
    pub value: ColexValue,
    #[serde(rename = "Code_ID")]
    pub code_id: String,
    #[serde(rename = "Example_IDs", serialize_with = "join_semicolon")]
    pub example_ids: Vec<String>,
}

impl Value {
    /// Ids and the code reference are derived from the language and feature,
    /// so a value can never point at a code of another parameter.
    pub fn new(
        language_id: &str,
        feature: &Feature,
        value: ColexValue,
        mut example_ids: Vec<String>,
    ) -> Result<Self> {
        non_empty("language", language_id)?;
        example_ids.sort();
        example_ids.dedup();
        Ok(Self {
            id: format!("{language_id}-{}", feature.id),
            language_id: language_id.to_string(),
            parameter_id: feature.id.clone(),
            value,
            code_id: feature.code_id(value),
            example_ids,
        })
    }
}

/// A supporting form (ExampleTable row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Language_ID")]
    pub language_id: String,
    #[serde(rename = "Primary_Text")]
    pub primary_text: String,
    #[serde(rename = "Gloss")]
    pub gloss: String,
}

impl From<&SourceForm> for Example {
    fn from(form: &SourceForm) -> Self {
        Self {
            id: form.id.clone(),
            language_id: form.language_id.clone(),
            primary_text: form.form.clone(),
            gloss: form.concept_gloss.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contribution {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Citation")]
    pub citation: String,
    #[serde(rename = "Collection_IDs", serialize_with = "join_space")]
    pub collection_ids: Vec<String>,
    #[serde(rename = "Glottocodes")]
    pub glottocodes: usize,
    #[serde(rename = "Doculects")]
    pub doculects: usize,
    #[serde(rename = "Concepts")]
    pub concepts: usize,
    #[serde(rename = "Senses")]
    pub senses: usize,
    #[serde(rename = "Forms")]
    pub forms: usize,
}

/// Row of the custom `collections.csv` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Varieties")]
    pub varieties: usize,
    #[serde(rename = "Glottocodes")]
    pub glottocodes: usize,
    #[serde(rename = "Concepts")]
    pub concepts: usize,
    #[serde(rename = "Forms")]
    pub forms: usize,
}

impl CollectionSummary {
    pub fn from_contributions(
        collection: &bodyobject_wordlist::Collection,
        contributions: &[Contribution],
    ) -> Self {
        let mut summary = Self {
            id: collection.id.to_string(),
            name: collection.id.to_string(),
            description: collection.description.to_string(),
            varieties: 0,
            glottocodes: 0,
            concepts: 0,
            forms: 0,
        };
        for contribution in contributions
            .iter()
            .filter(|c| c.collection_ids.iter().any(|id| id == collection.id))
        {
            summary.varieties += contribution.doculects;
            summary.glottocodes += contribution.glottocodes;
            summary.concepts += contribution.concepts;
            summary.forms += contribution.forms;
        }
        summary
    }
}

/// Everything one run produces, ready for the table writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CldfTables {
    pub languages: Vec<Language>,
    pub parameters: Vec<Feature>,
    pub codes: Vec<Code>,
    pub values: Vec<Value>,
    /// `None` when the run does not attach supporting forms.
    pub examples: Option<Vec<Example>>,
    pub contributions: Vec<Contribution>,
    pub collections: Vec<CollectionSummary>,
}

impl CldfTables {
    /// Order every table by its identifier.
    pub fn sort(&mut self) {
        self.languages.sort_by(|a, b| a.id.cmp(&b.id));
        self.parameters.sort_by(|a, b| a.id.cmp(&b.id));
        self.codes.sort_by(|a, b| a.id.cmp(&b.id));
        self.values.sort_by(|a, b| a.id.cmp(&b.id));
        if let Some(examples) = self.examples.as_mut() {
            examples.sort_by(|a, b| a.id.cmp(&b.id));
        }
        self.contributions.sort_by(|a, b| a.id.cmp(&b.id));
        self.collections.sort_by(|a, b| a.id.cmp(&b.id));
    }
}
