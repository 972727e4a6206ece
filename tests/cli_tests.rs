//! Command-line tests driving the `variant-explorer` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_fixture(dir: &Path) {
    let variants_dir = dir.join("VCFS");
    fs::create_dir(&variants_dir).unwrap();
    fs::write(
        dir.join("fenotipos_metadatos.csv"),
        "codigo;label;uri;gene\n\
         HP:0001250;Seizure;http://purl.obolibrary.org/obo/HP_0001250;SCN1A\n\
         HP:0001250;Seizure;http://purl.obolibrary.org/obo/HP_0001250;KCNQ2\n\
         HP:0000365;Hearing impairment;http://purl.obolibrary.org/obo/HP_0000365;GJB2\n",
    )
    .unwrap();
    fs::write(
        dir.join("pacientes_metadatos.csv"),
        "expediente;fenotipo\nPAC001;HP:0001250\nPAC002;HP:0000365\n",
    )
    .unwrap();
    fs::write(
        variants_dir.join("PAC001.csv"),
        "chr;pos_start;pos_end;reference;genotype;gene_symbol\n\
         chr2;166000000;166000001;C;CT;SCN1A\n\
         chr13;20189000;20189001;G;GA;GJB2\n",
    )
    .unwrap();
    fs::write(
        variants_dir.join("PAC002.csv"),
        "chr;pos_start;pos_end;reference;genotype;gene_symbol\n\
         chr13;20189500;20189501;T;TT;GJB2\n",
    )
    .unwrap();
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("variant-explorer").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_genes() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .arg("genes")
        .assert()
        .success()
        .stdout("SCN1A (1)\nGJB2 (2)\n");
}

#[test]
fn test_patients() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .arg("patients")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PAC001 (Variants: 2)\n  - Seizure (HP:0001250) [Gene Count: 2]\n",
        ));
}

#[test]
fn test_search_position_bounds() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .args(["search", "--chromosome", "chr13", "--start", "20189100"])
        .assert()
        .success()
        .stdout("chr13:20189500:20189501:T:TT (GJB2)\n");
}

#[test]
fn test_recommend() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .args(["recommend", "PAC001"])
        .assert()
        .success()
        .stdout("chr2:166000000:166000001:C:CT (SCN1A)\n");
}

#[test]
fn test_recommend_unknown_patient_fails() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .args(["recommend", "PAC999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Patient not found: PAC999"));
}

#[test]
fn test_recommend_json() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output = cmd(dir.path())
        .args(["recommend", "PAC002", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["gene_symbol"], "GJB2");
    assert_eq!(json[0]["pos_start"], 20_189_500);
}

#[test]
fn test_missing_sources_still_run() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Variants:          0"))
        .stdout(predicate::str::contains("Load failures (3):"))
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn test_shell_session() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .write_stdin("2\n1\n2\nPAC002\n3\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("GJB2 (2)"))
        .stdout(predicate::str::contains("chr13:20189500:20189501:T:TT (GJB2)"))
        .stdout(predicate::str::ends_with("Program terminated\n"));
}

#[test]
fn test_export() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    cmd(dir.path())
        .args(["export", "catalog.json"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("catalog.json")).unwrap())
            .unwrap();
    assert_eq!(json["patients"].as_array().unwrap().len(), 2);
    assert_eq!(json["phenotypes"][0]["genes"][0], "KCNQ2");
}

#[test]
fn test_invalid_delimiter() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["--delimiter", "é", "genes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid delimiter"));
}
