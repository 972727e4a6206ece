//! Row schemas for the three record sources.
//!
//! Column names follow the source files as delivered (`codigo`, `expediente`,
//! `fenotipo`); field names follow the catalog model.

use std::path::Path;

use serde::Deserialize;

use crate::core::variant::Variant;
use crate::parsing::delimited::{SourceError, SourceRow};

/// One row of the phenotype source: `codigo;label;uri;gene`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhenotypeRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    pub label: String,
    pub uri: String,
    pub gene: String,
}

/// One row of the patient source: `expediente;fenotipo`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "expediente")]
    pub record_id: String,
    #[serde(rename = "fenotipo")]
    pub phenotype_code: String,
}

/// One row of a per-patient variant source
///
/// Positions are kept as text here so a non-numeric value can be reported as a
/// [`SourceError::Parse`] with the offending field rather than a generic
/// deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariantRecord {
    pub chr: String,
    pub pos_start: String,
    pub pos_end: String,
    pub reference: String,
    pub genotype: String,
    pub gene_symbol: String,
}

impl SourceRow<VariantRecord> {
    /// Convert into a [`Variant`] owned by `patient_id`
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` if either position is not a non-negative integer.
    pub fn into_variant(self, patient_id: &str, path: &Path) -> Result<Variant, SourceError> {
        let line = self.line;
        let record = self.value;
        let position = |field: &'static str, value: &str| {
            value.parse::<u64>().map_err(|_| SourceError::Parse {
                path: path.to_path_buf(),
                line,
                field,
                value: value.to_string(),
            })
        };

        let pos_start = position("pos_start", &record.pos_start)?;
        let pos_end = position("pos_end", &record.pos_end)?;

        Ok(Variant::new(
            patient_id,
            record.chr,
            pos_start,
            pos_end,
            record.reference,
            record.genotype,
            record.gene_symbol,
        ))
    }
}
