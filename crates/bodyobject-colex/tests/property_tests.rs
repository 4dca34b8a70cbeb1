use bodyobject_colex::{
    capitalized_slug, codes_for, colex_value, materialize_values, post_filter, rank,
    select_features, ColexValue, ColexificationCount, ConceptFormIndex, Feature, Language,
    SourceForm,
};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

const BODYPARTS: &[&str] = &["HAND", "EYE", "MOUTH", "BACK (BODY PART)"];
const OBJECTS: &[&str] = &["KNIFE", "SEED", "BOAT", "ROPE"];
const LANGUAGES: &[&str] = &["a", "b", "c", "d", "e"];
const FORMS: &[&str] = &["ma", "ka", "te", "mano"];

fn forms_strategy() -> impl Strategy<Value = Vec<SourceForm>> {
    let glosses: Vec<&'static str> = BODYPARTS.iter().chain(OBJECTS).copied().collect();
    prop::collection::vec(
        (
            prop::sample::select(LANGUAGES),
            prop::sample::select(glosses),
            prop::sample::select(FORMS),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (lang, gloss, form))| SourceForm {
                id: format!("f{i}"),
                language_id: lang.to_string(),
                concept_gloss: gloss.to_string(),
                form: form.to_string(),
            })
            .collect()
    })
}

fn counts_strategy() -> impl Strategy<Value = ColexificationCount> {
    prop::collection::vec(
        (
            prop::sample::select(BODYPARTS),
            prop::sample::select(OBJECTS),
            1usize..5,
        ),
        0..16,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(b, o, n)| ((b.to_string(), o.to_string()), n))
            .collect()
    })
}

fn all_features() -> Vec<Feature> {
    BODYPARTS
        .iter()
        .flat_map(|b| OBJECTS.iter().map(move |o| Feature::new(b, o, 0).unwrap()))
        .collect()
}

fn language(id: &str) -> Language {
    Language {
        id: id.to_string(),
        name: id.to_string(),
        glottocode: None,
        dataset: "ds".to_string(),
        latitude: Some(0.0),
        longitude: Some(0.0),
        subgroup: None,
        family: None,
        forms: 0,
        forms_with_sounds: 0,
        concepts: 0,
        incollections: "ClicsCore".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn capitalized_slug_is_ascii_alnum(s in "\\PC{0,24}") {
        let slug = capitalized_slug(&s);
        prop_assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
        let mut chars = slug.chars();
        if let Some(first) = chars.next() {
            prop_assert!(!first.is_ascii_lowercase());
        }
        prop_assert!(chars.all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn missing_whenever_a_concept_has_no_forms(forms in forms_strategy()) {
        let index = ConceptFormIndex::from_forms(&forms);
        for feature in all_features() {
            for lang in LANGUAGES {
                let has = |gloss: &str| forms.iter().any(|f| f.language_id == *lang && f.concept_gloss == gloss);
                let value = colex_value(&index, lang, &feature);
                if !has(&feature.bodypart) || !has(&feature.object) {
                    prop_assert_eq!(value, ColexValue::Missing);
                } else {
                    prop_assert!(value.is_determined());
                }
            }
        }
    }

    #[test]
    fn codes_are_exactly_true_false_missing(top_n in 1usize..10, counts in counts_strategy()) {
        let features = select_features(&counts, top_n).unwrap();
        let codes = codes_for(&features);
        for feature in &features {
            let ids: BTreeSet<String> = codes
                .iter()
                .filter(|c| c.parameter_id == feature.id)
                .map(|c| c.id.clone())
                .collect();
            let expected: BTreeSet<String> = ColexValue::ALL
                .iter()
                .map(|v| format!("{}-{}", feature.id, v))
                .collect();
            prop_assert_eq!(ids, expected);
        }
    }

    #[test]
    fn selection_is_idempotent_and_ranked(top_n in 1usize..10, counts in counts_strategy()) {
        let first = select_features(&counts, top_n).unwrap();
        let second = select_features(&counts.clone(), top_n).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= top_n);
        prop_assert!(first.windows(2).all(|w| w[0].count >= w[1].count));

        let ranked = rank(&counts);
        if let Some(cutoff) = first.last() {
            // nothing outside the selection outranks its last member
            let selected: BTreeSet<(&str, &str)> =
                first.iter().map(|f| (f.bodypart.as_str(), f.object.as_str())).collect();
            for (b, o, n) in ranked {
                if !selected.contains(&(b, o)) && first.len() == top_n {
                    prop_assert!(n <= cutoff.count);
                }
            }
        }
    }

    #[test]
    fn post_filter_keeps_only_dense_languages(forms in forms_strategy(), min_values in 0usize..6) {
        let index = ConceptFormIndex::from_forms(&forms);
        let features = all_features();
        let values = materialize_values(LANGUAGES.iter().copied(), &features, &index, false).unwrap();
        let languages: Vec<Language> = LANGUAGES.iter().map(|l| language(l)).collect();

        let out = post_filter(languages, values, min_values);

        let mut determined: HashMap<&str, usize> = HashMap::new();
        for v in out.values.iter().filter(|v| v.value.is_determined()) {
            *determined.entry(v.language_id.as_str()).or_insert(0) += 1;
        }
        for lang in &out.languages {
            prop_assert!(determined.get(lang.id.as_str()).copied().unwrap_or(0) >= min_values);
        }
        let kept: BTreeSet<&str> = out.languages.iter().map(|l| l.id.as_str()).collect();
        prop_assert!(out.values.iter().all(|v| kept.contains(v.language_id.as_str())));
        for dropped in &out.dropped_languages {
            prop_assert!(!kept.contains(dropped.as_str()));
        }
    }
}
