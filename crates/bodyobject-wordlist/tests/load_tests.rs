use bodyobject_wordlist::{ConceptList, DatasetCatalog, Wordlist, WordlistError};
use std::path::Path;

fn write(path: &Path, text: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

#[test]
fn loads_tables_named_in_metadata() {
    let td = tempfile::tempdir().unwrap();
    let cldf = td.path().join("raw").join("northwind").join("cldf");
    write(
        &cldf.join("cldf-metadata.json"),
        r#"{
  "rdf:ID": "northwind",
  "dc:title": "Northwind wordlist",
  "dc:bibliographicCitation": "N. Wind 2019",
  "tables": [
    {"url": "langs.csv", "dc:conformsTo": "http://cldf.clld.org/v1.0/terms.rdf#LanguageTable"},
    {"url": "params.csv", "dc:conformsTo": "http://cldf.clld.org/v1.0/terms.rdf#ParameterTable"}
  ]
}"#,
    );
    write(
        &cldf.join("langs.csv"),
        "ID,Name,Glottocode,Latitude,Longitude\nnw,Northwind,nort1234,,\nsw,Southwind,sout1234,0.0,-3.5\n",
    );
    write(
        &cldf.join("params.csv"),
        "ID,Name,Concepticon_Gloss\n1,hand,HAND\n2,thing,\n",
    );
    write(
        &cldf.join("forms.csv"),
        "ID,Language_ID,Parameter_ID,Form,Segments\n1,nw,1,ka,k a\n2,nw,2,ti,\n3,sw,1,ko,k o\n",
    );

    let wl = Wordlist::from_dataset_dir(&td.path().join("raw"), "northwind").unwrap();
    assert_eq!(wl.id, "northwind");
    assert_eq!(wl.title, "Northwind wordlist");
    assert_eq!(wl.citation, "N. Wind 2019");
    assert_eq!(wl.languages.len(), 2);
    assert_eq!(wl.languages[0].latitude, None);
    assert_eq!(wl.languages[1].latitude, Some(0.0));
    assert_eq!(wl.concept_gloss("1"), Some("HAND"));
    assert_eq!(wl.concept_gloss("2"), None);

    let stats = wl.language_stats();
    assert_eq!(stats["nw"].concepts, 1);
    assert_eq!(stats["nw"].forms, 2);
    assert_eq!(stats["nw"].forms_with_sounds, 1);

    let summary = wl.summary();
    assert_eq!(summary.glottocodes, 2);
    assert_eq!(summary.senses, 2);
    assert_eq!(summary.concepts, 1);
    assert_eq!(summary.forms, 3);
}

#[test]
fn metadata_without_id_falls_back_to_directory_name() {
    let td = tempfile::tempdir().unwrap();
    let cldf = td.path().join("cldf");
    write(&cldf.join("cldf-metadata.json"), "{}");
    write(&cldf.join("languages.csv"), "ID\n");
    write(&cldf.join("parameters.csv"), "ID\n");
    write(&cldf.join("forms.csv"), "ID,Language_ID,Parameter_ID\n");

    let wl = Wordlist::load(&cldf, "fallback").unwrap();
    assert_eq!(wl.id, "fallback");
    assert!(wl.forms.is_empty());
}

#[test]
fn missing_metadata_and_columns_are_errors() {
    let td = tempfile::tempdir().unwrap();
    let err = Wordlist::from_dataset_dir(td.path(), "nothing").unwrap_err();
    assert!(matches!(err, WordlistError::Io { .. }));

    let cldf = td.path().join("cldf");
    write(&cldf.join("cldf-metadata.json"), "{}");
    write(&cldf.join("languages.csv"), "ID\n");
    write(&cldf.join("parameters.csv"), "ID\n");
    write(&cldf.join("forms.csv"), "ID,Language_ID\n");
    let err = Wordlist::load(&cldf, "ds").unwrap_err();
    assert!(matches!(err, WordlistError::MissingColumn { ref column, .. } if column == "Parameter_ID"));

    write(&cldf.join("cldf-metadata.json"), "{ not json");
    let err = Wordlist::load(&cldf, "ds").unwrap_err();
    assert!(matches!(err, WordlistError::Metadata { .. }));
}

#[test]
fn etc_files_from_disk() {
    let td = tempfile::tempdir().unwrap();
    let concepts = td.path().join("Tjuka-2022-784.tsv");
    write(
        &concepts,
        "ID\tCONCEPTICON_GLOSS\tGROUP\n1\tHAND\tbody\n2\tKNIFE\tobject\n3\t\tbody\n",
    );
    let catalog = td.path().join("lexibank.csv");
    write(
        &catalog,
        "Dataset,Zenodo,ClicsCore\nb,z2,x\na,z1,x\na,z1,x\nc,,x\n",
    );

    let list = ConceptList::from_path(&concepts).unwrap();
    assert!(list.is_bodypart("HAND"));
    assert!(list.is_object("KNIFE"));
    assert_eq!(list.entries().len(), 2);
    assert_eq!(list.bodyparts().iter().collect::<Vec<_>>(), vec!["HAND"]);
    assert_eq!(list.objects().iter().collect::<Vec<_>>(), vec!["KNIFE"]);

    let catalog = DatasetCatalog::from_path(&catalog).unwrap();
    assert_eq!(catalog.dataset_ids(Some("ClicsCore")), vec!["a", "b"]);
    assert!(DatasetCatalog::from_path(&td.path().join("absent.csv")).is_err());
}
