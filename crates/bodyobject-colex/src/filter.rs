//! Admission of languages and forms from a source wordlist.

use crate::{namespaced_id, SourceForm, SourceLanguage};
use bodyobject_wordlist::{ConceptList, FormRecord, LanguageRecord, LanguageStats, Wordlist};
use std::collections::{HashMap, HashSet};

/// Names that mark a language row as unnamed.
pub const PLACEHOLDER_NAMES: &[&str] = &["None"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Empty or placeholder name. Reported with a warning.
    Unnamed,
    /// No latitude. Dropped silently.
    NoCoordinates,
    /// Fails the collection's richness condition. Dropped silently.
    TooFewConcepts { concepts: usize, required: usize },
}

/// Decide whether one language row is admissible.
///
/// A latitude of `0.0` is on the equator and counts as present; only an
/// absent or unparsable latitude rejects the row.
pub fn check_language(
    record: &LanguageRecord,
    stats: &LanguageStats,
    min_concepts: usize,
) -> Result<(), Rejection> {
    let name = record.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() || PLACEHOLDER_NAMES.contains(&name) {
        return Err(Rejection::Unnamed);
    }
    if record.latitude.is_none() {
        return Err(Rejection::NoCoordinates);
    }
    if stats.concepts < min_concepts {
        return Err(Rejection::TooFewConcepts {
            concepts: stats.concepts,
            required: min_concepts,
        });
    }
    Ok(())
}

/// Languages of `wordlist` that pass `check_language`, with namespaced ids.
pub fn admit_languages(wordlist: &Wordlist, min_concepts: usize) -> Vec<SourceLanguage> {
    let stats = wordlist.language_stats();
    let mut admitted = Vec::new();

    for record in &wordlist.languages {
        let lang_stats = stats.get(&record.id).cloned().unwrap_or_default();
        match check_language(record, &lang_stats, min_concepts) {
            Ok(()) => admitted.push(SourceLanguage {
                id: namespaced_id(&wordlist.id, &record.id),
                glottocode: record
                    .glottocode
                    .as_deref()
                    .map(str::trim)
                    .filter(|g| !g.is_empty())
                    .map(str::to_string),
                name: record.name.clone().unwrap_or_default().trim().to_string(),
                dataset_id: wordlist.id.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                subgroup: record.subgroup.clone(),
                family: record.family.clone(),
                concept_count: lang_stats.concepts,
                form_count: lang_stats.forms,
                forms_with_sounds: lang_stats.forms_with_sounds,
            }),
            Err(Rejection::Unnamed) => tracing::warn!(
                dataset = %wordlist.id,
                language = %record.id,
                name = ?record.name,
                "skipping language without a usable name"
            ),
            Err(reason) => tracing::debug!(
                dataset = %wordlist.id,
                language = %record.id,
                ?reason,
                "language not admitted"
            ),
        }
    }
    admitted
}

/// A form is kept when its parameter links to a whitelisted Concepticon gloss.
pub fn admit_form(wordlist: &Wordlist, form: &FormRecord, concepts: &ConceptList) -> Option<SourceForm> {
    let gloss = wordlist.concept_gloss(&form.parameter_id)?;
    if !concepts.contains(gloss) {
        return None;
    }
    Some(SourceForm {
        id: namespaced_id(&wordlist.id, &form.id),
        language_id: namespaced_id(&wordlist.id, &form.language_id),
        concept_gloss: gloss.to_string(),
        form: form.form.clone(),
    })
}

/// Whitelisted forms belonging to the admitted languages.
pub fn admit_forms(
    wordlist: &Wordlist,
    languages: &[SourceLanguage],
    concepts: &ConceptList,
) -> Vec<SourceForm> {
    let admitted: HashSet<&str> = languages.iter().map(|l| l.id.as_str()).collect();
    wordlist
        .forms
        .iter()
        .filter_map(|form| admit_form(wordlist, form, concepts))
        .filter(|form| admitted.contains(form.language_id.as_str()))
        .collect()
}

/// Keep one language per glottocode: the one with the most retained forms.
///
/// Languages are visited in the given order and a later language only
/// replaces an earlier one when it has strictly more forms, so ties keep the
/// first seen. Languages without a glottocode are never merged. Returns the
/// kept languages (in original order) and the ids that were dropped.
pub fn dedup_by_glottocode(
    languages: Vec<SourceLanguage>,
    retained_forms: &HashMap<String, usize>,
) -> (Vec<SourceLanguage>, Vec<String>) {
    let count = |id: &str| retained_forms.get(id).copied().unwrap_or(0);
    let mut best: HashMap<String, usize> = HashMap::new();

    for (idx, lang) in languages.iter().enumerate() {
        let Some(glottocode) = lang.glottocode.as_ref() else {
            continue;
        };
        match best.get(glottocode) {
            Some(&current) if count(&languages[current].id) >= count(&lang.id) => {}
            _ => {
                best.insert(glottocode.clone(), idx);
            }
        }
    }

    let mut kept = Vec::with_capacity(languages.len());
    let mut dropped = Vec::new();
    for (idx, lang) in languages.into_iter().enumerate() {
        let keep = match lang.glottocode.as_ref() {
            Some(glottocode) => best.get(glottocode) == Some(&idx),
            None => true,
        };
        if keep {
            kept.push(lang);
        } else {
            tracing::debug!(language = %lang.id, glottocode = ?lang.glottocode, "duplicate glottocode");
            dropped.push(lang.id);
        }
    }
    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, latitude: Option<f64>) -> LanguageRecord {
        LanguageRecord {
            id: "l".into(),
            name: name.map(str::to_string),
            glottocode: None,
            latitude,
            longitude: latitude,
            subgroup: None,
            family: None,
        }
    }

    fn stats(concepts: usize) -> LanguageStats {
        LanguageStats {
            concepts,
            forms: concepts,
            forms_with_sounds: 0,
        }
    }

    #[test]
    fn placeholder_and_empty_names_are_unnamed() {
        for name in [None, Some(""), Some("  "), Some("None")] {
            assert_eq!(
                check_language(&record(name, Some(1.0)), &stats(300), 250),
                Err(Rejection::Unnamed)
            );
        }
    }

    #[test]
    fn coordinates_and_richness_are_required() {
        assert_eq!(
            check_language(&record(Some("A"), None), &stats(300), 250),
            Err(Rejection::NoCoordinates)
        );
        assert_eq!(
            check_language(&record(Some("A"), Some(0.0)), &stats(249), 250),
            Err(Rejection::TooFewConcepts {
                concepts: 249,
                required: 250
            })
        );
        assert_eq!(check_language(&record(Some("A"), Some(0.0)), &stats(250), 250), Ok(()));
    }

    fn lang(id: &str, glottocode: Option<&str>) -> SourceLanguage {
        SourceLanguage {
            id: id.into(),
            glottocode: glottocode.map(str::to_string),
            name: id.into(),
            dataset_id: "ds".into(),
            latitude: Some(0.0),
            longitude: Some(0.0),
            subgroup: None,
            family: None,
            concept_count: 0,
            form_count: 0,
            forms_with_sounds: 0,
        }
    }

    #[test]
    fn dedup_keeps_richest_variant_and_first_on_tie() {
        let languages = vec![
            lang("a-1", Some("stan1293")),
            lang("b-1", Some("stan1293")),
            lang("c-1", Some("stan1293")),
            lang("a-2", Some("fren1241")),
            lang("b-2", Some("fren1241")),
            lang("x", None),
            lang("y", None),
        ];
        let counts: HashMap<String, usize> = [("a-1", 3), ("b-1", 5), ("c-1", 5), ("a-2", 2), ("b-2", 2)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        let (kept, dropped) = dedup_by_glottocode(languages, &counts);
        let kept: Vec<&str> = kept.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(kept, vec!["b-1", "a-2", "x", "y"]);
        assert_eq!(dropped, vec!["a-1", "c-1", "b-2"]);
    }
}
