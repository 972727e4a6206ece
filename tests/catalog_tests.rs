//! End-to-end catalog tests over source files on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use variant_explorer::{Catalog, CatalogError, SourceFormat, SourcePaths, VariantQuery};

const VARIANT_HEADER: &str = "chr;pos_start;pos_end;reference;genotype;gene_symbol\n";

fn write_sources(dir: &Path, variant_gene: &str) -> SourcePaths {
    let variants_dir = dir.join("VCFS");
    fs::create_dir_all(&variants_dir).unwrap();
    fs::write(
        dir.join("fenotipos.csv"),
        "codigo;label;uri;gene\nP1;Label1;uri1;GENE_A\n",
    )
    .unwrap();
    fs::write(dir.join("pacientes.csv"), "expediente;fenotipo\nPT1;P1\n").unwrap();
    fs::write(
        variants_dir.join("PT1.csv"),
        format!("{VARIANT_HEADER}chr1;100;200;A;AA;{variant_gene}\n"),
    )
    .unwrap();

    SourcePaths {
        phenotypes: dir.join("fenotipos.csv"),
        patients: dir.join("pacientes.csv"),
        variants_dir,
    }
}

fn pt_format() -> SourceFormat {
    SourceFormat::default().with_variant_prefix("PT")
}

#[test]
fn test_recommend_round_trip() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), "GENE_A");
    let (catalog, report) = Catalog::load(&paths, &pt_format());
    assert!(report.is_clean());

    let recommended: Vec<String> = catalog
        .recommend_variants("PT1")
        .unwrap()
        .map(ToString::to_string)
        .collect();
    assert_eq!(recommended, vec!["chr1:100:200:A:AA (GENE_A)"]);
}

#[test]
fn test_irrelevant_gene_is_searchable_but_not_recommended() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), "GENE_B");
    let (catalog, _) = Catalog::load(&paths, &pt_format());

    assert_eq!(catalog.recommend_variants("PT1").unwrap().count(), 0);

    let found: Vec<String> = catalog
        .search_variants(VariantQuery::new().with_gene("GENE_B"))
        .map(ToString::to_string)
        .collect();
    assert_eq!(found, vec!["chr1:100:200:A:AA (GENE_B)"]);
}

#[test]
fn test_recommend_unknown_patient() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), "GENE_A");
    let (catalog, _) = Catalog::load(&paths, &pt_format());

    assert!(matches!(
        catalog.recommend_variants("PT404"),
        Err(CatalogError::PatientNotFound(_))
    ));
}

#[test]
fn test_variant_count_matches_rows_in_patient_source() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), "GENE_A");
    fs::write(
        paths.variants_dir.join("PT2.csv"),
        format!("{VARIANT_HEADER}chr1;1;2;A;AA;G1\nchr1;3;4;A;AA;G2\nchr1;5;6;A;AA;G1\n"),
    )
    .unwrap();
    fs::write(
        dir.path().join("pacientes.csv"),
        "expediente;fenotipo\nPT1;P1\nPT2;P1\n",
    )
    .unwrap();

    let (catalog, _) = Catalog::load(&paths, &pt_format());

    let pt2 = catalog.patient("PT2").unwrap();
    assert_eq!(pt2.variant_count(), 3);
    assert!(catalog.variants_of(pt2).all(|v| v.patient_id == "PT2"));
    assert_eq!(catalog.variants().len(), 4);
}

#[test]
fn test_wrong_delimiter_reports_unreadable_source() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), "GENE_A");
    let format = pt_format().with_delimiter(b',');

    let (catalog, report) = Catalog::load(&paths, &format);

    // Every source lacks its named columns when split on ','
    assert_eq!(report.failures.len(), 3);
    assert!(catalog.phenotypes().is_empty());
    assert!(catalog.variants().is_empty());
    assert!(catalog.gene_counts().is_empty());
}

#[test]
fn test_padded_fields_are_trimmed_on_load() {
    let dir = TempDir::new().unwrap();
    let paths = write_sources(dir.path(), " GENE_A ");
    let (catalog, _) = Catalog::load(&paths, &pt_format());

    assert_eq!(catalog.variants()[0].gene_symbol, "GENE_A");
    assert_eq!(
        catalog
            .search_variants(VariantQuery::new().with_gene("GENE_A"))
            .count(),
        1
    );
    assert_eq!(
        catalog
            .search_variants(VariantQuery::new().with_gene(" GENE_A "))
            .count(),
        0
    );
}
