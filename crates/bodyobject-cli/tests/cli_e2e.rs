use std::path::{Path, PathBuf};
use std::process::Command;

fn write(path: &Path, text: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn fixture(root: &Path) -> (PathBuf, PathBuf) {
    let etc = root.join("etc");
    let raw = root.join("raw");
    write(
        &etc.join("Tjuka-2022-784.tsv"),
        "ID\tCONCEPTICON_GLOSS\tGROUP\n1\tHAND\tbody\n2\tEYE\tbody\n3\tKNIFE\tobject\n4\tSEED\tobject\n",
    );
    write(
        &etc.join("lexibank.csv"),
        "Dataset,Zenodo,ClicsCore\nds,10.5281/zenodo.1,x\nmissing,10.5281/zenodo.2,x\n",
    );

    let cldf = raw.join("ds").join("cldf");
    write(&cldf.join("cldf-metadata.json"), r#"{"rdf:ID": "ds", "dc:title": "Test wordlist"}"#);
    write(
        &cldf.join("languages.csv"),
        "ID,Name,Glottocode,Latitude,Longitude\na,Lang A,aaaa1111,1.0,1.0\nb,Lang B,bbbb2222,2.0,2.0\n",
    );
    write(
        &cldf.join("parameters.csv"),
        "ID,Concepticon_Gloss\n1,HAND\n2,KNIFE\n3,EYE\n4,SEED\n",
    );
    write(
        &cldf.join("forms.csv"),
        "ID,Language_ID,Parameter_ID,Form\n\
1,a,1,mano\n2,a,2,mano\n3,a,3,ojo\n4,a,4,semi\n\
5,b,1,te\n6,b,2,ki\n7,b,3,ey\n8,b,4,ey\n",
    );
    (etc, raw)
}

#[test]
fn makecldf_then_check() {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_bodyobject"));
    let td = tempfile::tempdir().unwrap();
    let (etc, raw) = fixture(td.path());
    let out = td.path().join("cldf");

    let output = Command::new(&bin)
        .arg("makecldf")
        .arg("--etc-dir")
        .arg(&etc)
        .arg("--raw-dir")
        .arg(&raw)
        .arg("--out-dir")
        .arg(&out)
        .args(["--min-concepts", "1", "--min-values", "2", "--examples"])
        .output()
        .expect("run bodyobject makecldf");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("concepts:  2 body parts, 2 objects"));
    assert!(stdout.contains("1 loaded, 1 skipped"));

    let parameters = std::fs::read_to_string(out.join("parameters.csv")).unwrap();
    assert!(parameters.contains("\nEyeAndSeed,"));
    assert!(parameters.contains("\nHandAndKnife,"));
    assert!(out.join("examples.csv").is_file());

    let output = Command::new(&bin)
        .arg("check")
        .arg("--cldf-dir")
        .arg(&out)
        .args(["--min-values", "2"])
        .output()
        .expect("run bodyobject check");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("values.csv: 4 rows"));

    let status = Command::new(&bin)
        .arg("check")
        .arg("--cldf-dir")
        .arg(&out)
        .args(["--min-values", "3"])
        .status()
        .expect("run bodyobject check");
    assert!(!status.success());
}

#[test]
fn config_file_is_read() {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_bodyobject"));
    let td = tempfile::tempdir().unwrap();
    let (etc, raw) = fixture(td.path());
    let out = td.path().join("cldf");
    let config = td.path().join("config.json");
    write(&config, r#"{ "min_concepts": 1, "min_values": 1, "top_n": 1 }"#);

    let status = Command::new(&bin)
        .arg("makecldf")
        .arg("--etc-dir")
        .arg(&etc)
        .arg("--raw-dir")
        .arg(&raw)
        .arg("--out-dir")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .status()
        .expect("run bodyobject makecldf");
    assert!(status.success());

    let parameters = std::fs::read_to_string(out.join("parameters.csv")).unwrap();
    assert_eq!(parameters.lines().count(), 2);
    assert!(!out.join("examples.csv").exists());
}

#[test]
fn bad_config_fails() {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_bodyobject"));
    let td = tempfile::tempdir().unwrap();
    let (etc, raw) = fixture(td.path());
    let config = td.path().join("config.json");
    write(&config, r#"{ "collection": "Nope" }"#);

    let status = Command::new(&bin)
        .arg("makecldf")
        .arg("--etc-dir")
        .arg(&etc)
        .arg("--raw-dir")
        .arg(&raw)
        .arg("--out-dir")
        .arg(td.path().join("cldf"))
        .arg("--config")
        .arg(&config)
        .status()
        .expect("run bodyobject makecldf");
    assert!(!status.success());
}
