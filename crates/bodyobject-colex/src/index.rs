//! Concept/form indices and colexification counting.

use crate::SourceForm;
use bodyobject_wordlist::ConceptList;
use std::collections::{BTreeMap, BTreeSet};

/// `(language_id, concept_gloss)` → distinct form strings, plus the ids of the
/// source forms behind them.
#[derive(Debug, Clone, Default)]
pub struct ConceptFormIndex {
    forms: BTreeMap<(String, String), BTreeSet<String>>,
    sources: BTreeMap<(String, String), BTreeSet<String>>,
}

impl ConceptFormIndex {
    pub fn from_forms<'a>(forms: impl IntoIterator<Item = &'a SourceForm>) -> Self {
        let mut index = Self::default();
        for form in forms {
            index.insert(form);
        }
        index
    }

    /// Set semantics: repeating a form string for the same language and
    /// concept does not change the form set.
    pub fn insert(&mut self, form: &SourceForm) {
        let key = (form.language_id.clone(), form.concept_gloss.clone());
        self.forms
            .entry(key.clone())
            .or_default()
            .insert(form.form.clone());
        self.sources.entry(key).or_default().insert(form.id.clone());
    }

    pub fn forms(&self, language_id: &str, gloss: &str) -> Option<&BTreeSet<String>> {
        self.forms.get(&(language_id.to_string(), gloss.to_string()))
    }

    pub fn form_ids(&self, language_id: &str, gloss: &str) -> Option<&BTreeSet<String>> {
        self.sources.get(&(language_id.to_string(), gloss.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &BTreeSet<String>)> {
        self.forms.iter()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn invert(&self) -> FormConceptIndex {
        let mut concepts: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
        for ((language_id, gloss), forms) in &self.forms {
            for form in forms {
                concepts
                    .entry((language_id.clone(), form.clone()))
                    .or_default()
                    .insert(gloss.clone());
            }
        }
        FormConceptIndex { concepts }
    }
}

/// `(language_id, form)` → concept glosses sharing that form. Derived from a
/// `ConceptFormIndex` only.
#[derive(Debug, Clone, Default)]
pub struct FormConceptIndex {
    concepts: BTreeMap<(String, String), BTreeSet<String>>,
}

impl FormConceptIndex {
    pub fn concepts(&self, language_id: &str, form: &str) -> Option<&BTreeSet<String>> {
        self.concepts
            .get(&(language_id.to_string(), form.to_string()))
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Count, per (body part, object) pair, the (language, form) entries
    /// whose concept set holds both. A form naming several concepts adds one
    /// observation per qualifying pair. A gloss listed in both groups is never
    /// paired with itself.
    pub fn count_colexifications(&self, concepts: &ConceptList) -> ColexificationCount {
        let mut counts = ColexificationCount::default();
        for glosses in self.concepts.values() {
            for bodypart in glosses.iter().filter(|g| concepts.is_bodypart(g)) {
                for object in glosses.iter().filter(|g| concepts.is_object(g)) {
                    if bodypart != object {
                        counts.increment(bodypart, object);
                    }
                }
            }
        }
        counts
    }
}

/// (body part gloss, object gloss) → number of colexifying observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColexificationCount {
    counts: BTreeMap<(String, String), usize>,
}

impl ColexificationCount {
    pub fn increment(&mut self, bodypart: &str, object: &str) {
        *self
            .counts
            .entry((bodypart.to_string(), object.to_string()))
            .or_insert(0) += 1;
    }

    pub fn get(&self, bodypart: &str, object: &str) -> usize {
        self.counts
            .get(&(bodypart.to_string(), object.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.counts
            .iter()
            .map(|((b, o), n)| (b.as_str(), o.as_str(), *n))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<((String, String), usize)> for ColexificationCount {
    fn from_iter<I: IntoIterator<Item = ((String, String), usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}
