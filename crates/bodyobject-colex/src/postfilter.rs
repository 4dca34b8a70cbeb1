//! Data-quality gate: languages with too few determined values are removed
//! from the published output together with their values.

use crate::{Language, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFiltered {
    pub languages: Vec<Language>,
    pub values: Vec<Value>,
    pub dropped_languages: Vec<String>,
}

/// Number of non-missing values per language id.
pub fn determined_counts(values: &[Value]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for value in values.iter().filter(|v| v.value.is_determined()) {
        *counts.entry(value.language_id.as_str()).or_insert(0) += 1;
    }
    counts
}

pub fn post_filter(languages: Vec<Language>, values: Vec<Value>, min_values: usize) -> PostFiltered {
    let counts = determined_counts(&values);
    let (kept, dropped): (Vec<Language>, Vec<Language>) = languages
        .into_iter()
        .partition(|l| counts.get(l.id.as_str()).copied().unwrap_or(0) >= min_values);

    let kept_ids: HashSet<&str> = kept.iter().map(|l| l.id.as_str()).collect();
    let values: Vec<Value> = values
        .into_iter()
        .filter(|v| kept_ids.contains(v.language_id.as_str()))
        .collect();
    let dropped_languages: Vec<String> = dropped.into_iter().map(|l| l.id).collect();

    if !dropped_languages.is_empty() {
        tracing::info!(
            dropped = dropped_languages.len(),
            kept = kept.len(),
            min_values,
            "removed languages with too few determined values"
        );
    }

    PostFiltered {
        languages: kept,
        values,
        dropped_languages,
    }
}
