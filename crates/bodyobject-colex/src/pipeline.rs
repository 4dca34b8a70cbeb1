//! One pipeline run: load → filter → aggregate → rank → materialize → gate.
//!
//! `Pipeline` is the run context. It owns the configuration, the concept list
//! and everything accumulated from the datasets added so far, and is consumed
//! by `finish`.

use crate::{
    admit_forms, admit_languages, codes_for, collect_examples, dedup_by_glottocode,
    materialize_values, post_filter, select_features, CldfTables, CollectionSummary,
    ConceptFormIndex, Contribution, Language, PipelineConfig, Result, SourceForm, SourceLanguage,
};
use bodyobject_wordlist::{Collection, ConceptList, DatasetCatalog, Wordlist};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// What one wordlist contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordlistReport {
    pub languages: usize,
    pub admitted_languages: usize,
    pub admitted_forms: usize,
    /// Languages and forms whose namespaced id was already taken.
    pub colliding_ids: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub candidate_pairs: usize,
    pub duplicate_languages: usize,
    pub sparse_languages: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub tables: CldfTables,
    pub stats: RunStats,
}

#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    collection: &'static Collection,
    concepts: ConceptList,
    languages: Vec<SourceLanguage>,
    forms: Vec<SourceForm>,
    contributions: Vec<Contribution>,
    language_ids: HashSet<String>,
    form_ids: HashSet<String>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, concepts: ConceptList) -> Result<Self> {
        config.validate()?;
        let collection = config.collection().ok_or_else(|| {
            crate::ColexError::InvalidConfig(format!("unknown collection `{}`", config.collection))
        })?;
        Ok(Self {
            config,
            collection,
            concepts,
            languages: Vec::new(),
            forms: Vec::new(),
            contributions: Vec::new(),
            language_ids: HashSet::new(),
            form_ids: HashSet::new(),
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn concepts(&self) -> &ConceptList {
        &self.concepts
    }

    /// Record the dataset's contribution and admit its languages and forms.
    ///
    /// `<dataset>-<id>` joins are not injective (`a` + `b-c` and `a-b` + `c`),
    /// so a language or form whose namespaced id is already taken is skipped.
    pub fn add_wordlist(&mut self, wordlist: &Wordlist) -> WordlistReport {
        let summary = wordlist.summary();
        self.contributions.push(Contribution {
            id: wordlist.id.clone(),
            name: wordlist.title.clone(),
            citation: wordlist.citation.clone(),
            collection_ids: vec![self.collection.id.to_string()],
            glottocodes: summary.glottocodes,
            doculects: summary.doculects,
            concepts: summary.concepts,
            senses: summary.senses,
            forms: summary.forms,
        });

        let mut colliding_ids = 0;
        let mut languages = admit_languages(wordlist, self.config.min_concepts);
        languages.retain(|lang| {
            if self.language_ids.insert(lang.id.clone()) {
                return true;
            }
            tracing::error!(dataset = %wordlist.id, language = %lang.id, "language id already taken, skipping");
            colliding_ids += 1;
            false
        });
        let mut forms = admit_forms(wordlist, &languages, &self.concepts);
        forms.retain(|form| {
            if self.form_ids.insert(form.id.clone()) {
                return true;
            }
            tracing::error!(dataset = %wordlist.id, form = %form.id, "form id already taken, skipping");
            colliding_ids += 1;
            false
        });
        let report = WordlistReport {
            languages: wordlist.languages.len(),
            admitted_languages: languages.len(),
            admitted_forms: forms.len(),
            colliding_ids,
        };
        tracing::info!(
            dataset = %wordlist.id,
            languages = report.languages,
            admitted = report.admitted_languages,
            forms = report.admitted_forms,
            "added wordlist"
        );

        self.languages.extend(languages);
        self.forms.extend(forms);
        report
    }

    /// Load every catalog dataset of the configured collection from
    /// `<raw_dir>/<id>/cldf`. Datasets that fail to load are logged and
    /// skipped.
    pub fn load_datasets(&mut self, raw_dir: &Path, catalog: &DatasetCatalog) -> LoadReport {
        let mut report = LoadReport::default();
        for dataset_id in catalog.dataset_ids(Some(self.collection.id)) {
            match Wordlist::from_dataset_dir(raw_dir, &dataset_id) {
                Ok(wordlist) => {
                    self.add_wordlist(&wordlist);
                    report.loaded.push(dataset_id);
                }
                Err(err) => {
                    tracing::error!(dataset = %dataset_id, error = %err, "skipping dataset");
                    report.skipped.push(dataset_id);
                }
            }
        }
        report
    }

    pub fn finish(self) -> Result<PipelineOutput> {
        let Pipeline {
            config,
            collection,
            concepts,
            languages,
            mut forms,
            contributions,
            language_ids: _,
            form_ids: _,
        } = self;
        let mut stats = RunStats::default();

        let languages = if config.dedup_glottocodes {
            let mut retained: HashMap<String, usize> = HashMap::new();
            for form in &forms {
                *retained.entry(form.language_id.clone()).or_insert(0) += 1;
            }
            let (kept, dropped) = dedup_by_glottocode(languages, &retained);
            stats.duplicate_languages = dropped.len();
            let dropped: HashSet<String> = dropped.into_iter().collect();
            forms.retain(|f| !dropped.contains(&f.language_id));
            kept
        } else {
            languages
        };

        let index = ConceptFormIndex::from_forms(&forms);
        let counts = index.invert().count_colexifications(&concepts);
        stats.candidate_pairs = counts.len();

        let features = select_features(&counts, config.top_n)?;
        let codes = codes_for(&features);

        let rows = languages
            .iter()
            .map(|l| Language::from_source(l, collection.id))
            .collect::<Result<Vec<_>>>()?;
        let values = materialize_values(
            languages.iter().map(|l| l.id.as_str()),
            &features,
            &index,
            config.with_examples,
        )?;

        let filtered = post_filter(rows, values, config.min_values);
        stats.sparse_languages = filtered.dropped_languages.len();

        let examples = config.with_examples.then(|| {
            let by_id: BTreeMap<String, SourceForm> =
                forms.into_iter().map(|f| (f.id.clone(), f)).collect();
            collect_examples(&filtered.values, &by_id)
        });

        let collections = vec![CollectionSummary::from_contributions(
            collection,
            &contributions,
        )];

        let mut tables = CldfTables {
            languages: filtered.languages,
            parameters: features,
            codes,
            values: filtered.values,
            examples,
            contributions,
            collections,
        };
        tables.sort();

        tracing::info!(
            languages = tables.languages.len(),
            features = tables.parameters.len(),
            values = tables.values.len(),
            "pipeline finished"
        );
        Ok(PipelineOutput { tables, stats })
    }
}
