//! Ranking of colexification pairs and feature selection.

use crate::{ColexError, ColexificationCount, Feature, Result};
use std::collections::HashSet;

/// All pairs ordered by descending count, ties by (body part, object).
pub fn rank(counts: &ColexificationCount) -> Vec<(&str, &str, usize)> {
    let mut ranked: Vec<(&str, &str, usize)> = counts.iter().collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));
    ranked
}

/// The `top_n` highest-ranked pairs as features.
///
/// A pair whose slug identifier is already taken by a higher-ranked pair, or
/// that has a gloss with nothing to slug, is skipped and the next pair fills
/// its place.
pub fn select_features(counts: &ColexificationCount, top_n: usize) -> Result<Vec<Feature>> {
    let mut features = Vec::with_capacity(top_n.min(counts.len()));
    let mut ids = HashSet::new();

    for (bodypart, object, count) in rank(counts) {
        if features.len() >= top_n {
            break;
        }
        let feature = match Feature::new(bodypart, object, count) {
            Ok(feature) => feature,
            Err(err @ ColexError::UnsluggableGloss { .. }) => {
                tracing::warn!(bodypart, object, error = %err, "skipping pair without an identifier");
                continue;
            }
            Err(err) => return Err(err),
        };
        if !ids.insert(feature.id.clone()) {
            tracing::warn!(
                id = %feature.id,
                bodypart,
                object,
                "feature identifier collision; keeping the higher-ranked pair"
            );
            continue;
        }
        features.push(feature);
    }

    tracing::info!(
        candidates = counts.len(),
        selected = features.len(),
        "selected colexification features"
    );
    Ok(features)
}
