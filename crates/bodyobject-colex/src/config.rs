//! Run configuration.

use crate::{ColexError, Result};
use anyhow::Context;
use bodyobject_wordlist::{Collection, CLICS_CORE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs of one pipeline run. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Collection whose datasets are processed.
    pub collection: String,
    /// Minimum number of Concepticon-linked concepts for a language.
    pub min_concepts: usize,
    /// Number of ranked body-part/object pairs kept as features.
    pub top_n: usize,
    /// Minimum number of determined values for a language to be published.
    pub min_values: usize,
    /// Attach supporting forms to values and emit an example table.
    pub with_examples: bool,
    /// Keep one language per glottocode (the one with most matching forms).
    pub dedup_glottocodes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collection: CLICS_CORE.id.to_string(),
            min_concepts: 250,
            top_n: 100,
            min_values: 20,
            with_examples: false,
            dedup_glottocodes: true,
        }
    }
}

impl PipelineConfig {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            return Err(ColexError::InvalidConfig("top_n must be positive".into()));
        }
        if Collection::by_id(&self.collection).is_none() {
            return Err(ColexError::InvalidConfig(format!(
                "unknown collection `{}`",
                self.collection
            )));
        }
        Ok(())
    }

    pub fn collection(&self) -> Option<&'static Collection> {
        Collection::by_id(&self.collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "top_n": 5, "with_examples": true }"#).unwrap();

        let config = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(config.top_n, 5);
        assert!(config.with_examples);
        assert_eq!(config.min_values, 20);
        assert_eq!(config.min_concepts, 250);
        assert_eq!(config.collection, "ClicsCore");
    }

    #[test]
    fn unknown_collection_is_rejected() {
        let config = PipelineConfig {
            collection: "Nope".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ColexError::InvalidConfig(_))));
    }
}
