use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::store::Catalog;
use crate::parsing::delimited::{Records, SourceError, SourceFormat};
use crate::parsing::records::{PatientRecord, PhenotypeRecord, VariantRecord};
use crate::utils::validation::{is_variant_source, patient_id_for_source};

/// Locations of the three record sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub phenotypes: PathBuf,
    pub patients: PathBuf,
    /// Directory holding one variant source per patient
    pub variants_dir: PathBuf,
}

/// Outcome of loading a directory of variant sources
#[derive(Debug, Default)]
pub struct VariantLoad {
    /// Sub-sources that matched the name pattern
    pub sources: usize,
    /// Variants added to the catalog
    pub variants: usize,
    /// Variants whose patient was not in the catalog
    pub orphaned: usize,
    pub failures: Vec<SourceError>,
}

/// Outcome of a full three-pass load
#[derive(Debug, Default, Serialize)]
pub struct LoadReport {
    pub phenotype_rows: usize,
    pub patient_rows: usize,
    pub variant_sources: usize,
    pub variants: usize,
    pub orphaned_variants: usize,
    /// Every source failure, in the order encountered
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<SourceError>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn serialize_failures<S: serde::Serializer>(
    failures: &[SourceError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(ToString::to_string))
}

fn report_failure(err: &SourceError) {
    warn!("{err}");
}

impl Catalog {
    /// Build a catalog from all three sources, in dependency order
    ///
    /// Failures never abort the load: each is logged, recorded in the report,
    /// and whatever was parsed before it is kept.
    pub fn load(paths: &SourcePaths, format: &SourceFormat) -> (Self, LoadReport) {
        let mut catalog = Self::new();
        let mut report = LoadReport::default();

        let phenotypes = Records::open(&paths.phenotypes, format)
            .inspect_err(report_failure)
            .and_then(|records| catalog.apply_phenotypes(records, &mut report.phenotype_rows));
        if let Err(e) = phenotypes {
            report.failures.push(e);
        }

        let patients = Records::open(&paths.patients, format)
            .inspect_err(report_failure)
            .and_then(|records| catalog.apply_patients(records, &mut report.patient_rows));
        if let Err(e) = patients {
            report.failures.push(e);
        }

        let variants = catalog.load_variants(&paths.variants_dir, format);
        report.variant_sources = variants.sources;
        report.variants = variants.variants;
        report.orphaned_variants = variants.orphaned;
        report.failures.extend(variants.failures);

        debug!(
            "Loaded {} phenotypes, {} patients, {} variants ({} failures)",
            catalog.phenotypes().len(),
            catalog.patients().len(),
            catalog.variants().len(),
            report.failures.len()
        );

        (catalog, report)
    }

    /// Load the phenotype source
    ///
    /// Returns the number of rows applied. Rows read before a failure stay in
    /// the catalog.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the file does not exist, or
    /// `SourceError::Unreadable` if it cannot be read or a row lacks a column.
    pub fn load_phenotypes(
        &mut self,
        path: &Path,
        format: &SourceFormat,
    ) -> Result<usize, SourceError> {
        let records = Records::open(path, format).inspect_err(report_failure)?;
        let mut rows = 0;
        self.apply_phenotypes(records, &mut rows)?;
        Ok(rows)
    }

    /// Load phenotype rows from any reader
    ///
    /// # Errors
    ///
    /// See [`Catalog::load_phenotypes`].
    pub fn load_phenotypes_from<R: Read>(
        &mut self,
        name: &Path,
        reader: R,
        format: &SourceFormat,
    ) -> Result<usize, SourceError> {
        let records = Records::from_reader(name, reader, format).inspect_err(report_failure)?;
        let mut rows = 0;
        self.apply_phenotypes(records, &mut rows)?;
        Ok(rows)
    }

    /// Apply phenotype rows, counting each one in `rows` as it lands
    fn apply_phenotypes<R: Read>(
        &mut self,
        records: Records<R, PhenotypeRecord>,
        rows: &mut usize,
    ) -> Result<(), SourceError> {
        let path = records.path().to_path_buf();
        for row in records {
            let record = row.inspect_err(report_failure)?.value;
            self.phenotype_entry(&record.code, &record.label, &record.uri)
                .add_gene(record.gene);
            *rows += 1;
        }
        debug!("Read {rows} phenotype rows from {}", path.display());
        Ok(())
    }

    /// Load the patient source; phenotypes must already be loaded
    ///
    /// Links to unknown phenotype codes are skipped without error.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` if the file does not exist, or
    /// `SourceError::Unreadable` if it cannot be read or a row lacks a column.
    pub fn load_patients(
        &mut self,
        path: &Path,
        format: &SourceFormat,
    ) -> Result<usize, SourceError> {
        let records = Records::open(path, format).inspect_err(report_failure)?;
        let mut rows = 0;
        self.apply_patients(records, &mut rows)?;
        Ok(rows)
    }

    /// Load patient rows from any reader
    ///
    /// # Errors
    ///
    /// See [`Catalog::load_patients`].
    pub fn load_patients_from<R: Read>(
        &mut self,
        name: &Path,
        reader: R,
        format: &SourceFormat,
    ) -> Result<usize, SourceError> {
        let records = Records::from_reader(name, reader, format).inspect_err(report_failure)?;
        let mut rows = 0;
        self.apply_patients(records, &mut rows)?;
        Ok(rows)
    }

    /// Apply patient rows, counting each one in `rows` as it lands
    fn apply_patients<R: Read>(
        &mut self,
        records: Records<R, PatientRecord>,
        rows: &mut usize,
    ) -> Result<(), SourceError> {
        let path = records.path().to_path_buf();
        for row in records {
            let record = row.inspect_err(report_failure)?.value;
            if !self.link_phenotype(&record.record_id, &record.phenotype_code) {
                debug!(
                    "Patient {}: unknown phenotype code '{}'",
                    record.record_id, record.phenotype_code
                );
            }
            *rows += 1;
        }
        debug!("Read {rows} patient rows from {}", path.display());
        Ok(())
    }

    /// Load every variant source in `dir`; patients must already be loaded
    ///
    /// Sources are visited in file-name order. A failing source is recorded and
    /// skipped; rows read from it before the failure are kept.
    pub fn load_variants(&mut self, dir: &Path, format: &SourceFormat) -> VariantLoad {
        let mut load = VariantLoad::default();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                let err = SourceError::from_io(dir, &e);
                report_failure(&err);
                load.failures.push(err);
                return load;
            }
        };

        let entries = entries.map(|entry| entry.map(|entry| entry.path()));
        for path in variant_sources(dir, entries, format, &mut load.failures) {
            load.sources += 1;
            let before = self.variants().len();
            let orphaned_before = load.orphaned;
            if let Err(e) = self.load_variant_source(&path, format, &mut load.orphaned) {
                load.failures.push(e);
            }
            let added = self.variants().len() - before;
            load.variants += added;
            debug!(
                "Read {added} variants from {} ({} orphaned)",
                path.display(),
                load.orphaned - orphaned_before
            );
        }

        load
    }

    fn load_variant_source(
        &mut self,
        path: &Path,
        format: &SourceFormat,
        orphaned: &mut usize,
    ) -> Result<(), SourceError> {
        let patient_id = patient_id_for_source(path).ok_or_else(|| SourceError::Unreadable {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        });
        let patient_id = patient_id.inspect_err(report_failure)?.to_string();

        let records: Records<_, VariantRecord> =
            Records::open(path, format).inspect_err(report_failure)?;

        for row in records {
            let variant = row
                .and_then(|row| row.into_variant(&patient_id, path))
                .inspect_err(report_failure)?;
            if !self.add_variant(variant) {
                *orphaned += 1;
            }
        }
        Ok(())
    }
}

/// Variant sources among directory `entries`, sorted by file name
///
/// Entries that cannot be read are recorded in `failures` as unreadable.
fn variant_sources(
    dir: &Path,
    entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
    format: &SourceFormat,
    failures: &mut Vec<SourceError>,
) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if is_variant_source(&path, format) => sources.push(path),
            Ok(_) => {}
            Err(e) => {
                let err = SourceError::Unreadable {
                    path: dir.to_path_buf(),
                    reason: format!("directory entry: {e}"),
                };
                report_failure(&err);
                failures.push(err);
            }
        }
    }
    sources.sort();
    sources
}
