//! Per-language values, codes and supporting examples.

use crate::{Code, ColexValue, ConceptFormIndex, Example, Feature, Result, SourceForm, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Ternary colexification value of `feature` in one language.
pub fn colex_value(index: &ConceptFormIndex, language_id: &str, feature: &Feature) -> ColexValue {
    let bodypart = index.forms(language_id, &feature.bodypart);
    let object = index.forms(language_id, &feature.object);
    match (bodypart, object) {
        (Some(b), Some(o)) if !b.is_empty() && !o.is_empty() => {
            if b.intersection(o).next().is_some() {
                ColexValue::True
            } else {
                ColexValue::False
            }
        }
        _ => ColexValue::Missing,
    }
}

/// The three codes (true, false, missing) of every feature.
pub fn codes_for(features: &[Feature]) -> Vec<Code> {
    features
        .iter()
        .flat_map(|f| ColexValue::ALL.iter().map(move |v| Code::new(f, *v)))
        .collect()
}

/// Source form ids for both concepts of `feature` in one language.
pub fn example_ids(index: &ConceptFormIndex, language_id: &str, feature: &Feature) -> Vec<String> {
    let mut ids = BTreeSet::new();
    for gloss in [&feature.bodypart, &feature.object] {
        if let Some(found) = index.form_ids(language_id, gloss) {
            ids.extend(found.iter().cloned());
        }
    }
    ids.into_iter().collect()
}

/// One value per language × feature.
pub fn materialize_values<'a>(
    language_ids: impl IntoIterator<Item = &'a str>,
    features: &[Feature],
    index: &ConceptFormIndex,
    with_examples: bool,
) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for language_id in language_ids {
        for feature in features {
            let value = colex_value(index, language_id, feature);
            let examples = if with_examples {
                example_ids(index, language_id, feature)
            } else {
                Vec::new()
            };
            values.push(Value::new(language_id, feature, value, examples)?);
        }
    }
    Ok(values)
}

/// Example rows for every form referenced by `values`.
pub fn collect_examples(values: &[Value], forms: &BTreeMap<String, SourceForm>) -> Vec<Example> {
    let referenced: BTreeSet<&str> = values
        .iter()
        .flat_map(|v| v.example_ids.iter().map(String::as_str))
        .collect();
    referenced
        .into_iter()
        .filter_map(|id| forms.get(id))
        .map(Example::from)
        .collect()
}
