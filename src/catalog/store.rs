use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::core::patient::Patient;
use crate::core::phenotype::Phenotype;
use crate::core::variant::Variant;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Patient not found: {0}")]
    PatientNotFound(String),

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Export format version
pub const CATALOG_VERSION: &str = "1.0.0";

/// A patient as written to the JSON export, with phenotypes resolved to codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedPatient {
    pub id: String,
    pub phenotypes: Vec<String>,
    pub variants: Vec<Variant>,
}

/// Serializable snapshot of the joined catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub phenotypes: Vec<Phenotype>,
    pub patients: Vec<ExportedPatient>,
    /// Variants whose patient id was not in the patient source
    pub orphaned_variants: Vec<Variant>,
}

/// The in-memory join of phenotypes, patients and variants
///
/// Phenotypes and patients are stored in first-seen order with an id index;
/// patients link to phenotypes and variants by index into these collections.
#[derive(Debug, Default)]
pub struct Catalog {
    phenotypes: Vec<Phenotype>,

    /// Index: phenotype code -> index in phenotypes vec
    code_to_index: HashMap<String, usize>,

    patients: Vec<Patient>,

    /// Index: patient id -> index in patients vec
    id_to_index: HashMap<String, usize>,

    /// Every loaded variant, in load order
    variants: Vec<Variant>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the phenotype for `code`
    ///
    /// Label and URI are only used when the phenotype is created; later calls
    /// with the same code cannot change them.
    pub fn phenotype_entry(&mut self, code: &str, label: &str, uri: &str) -> &mut Phenotype {
        let index = match self.code_to_index.get(code) {
            Some(&index) => index,
            None => {
                let index = self.phenotypes.len();
                self.phenotypes.push(Phenotype::new(code, label, uri));
                self.code_to_index.insert(code.to_string(), index);
                index
            }
        };
        &mut self.phenotypes[index]
    }

    /// Get or create the patient with record id `id`
    pub fn patient_entry(&mut self, id: &str) -> &mut Patient {
        let index = match self.id_to_index.get(id) {
            Some(&index) => index,
            None => {
                let index = self.patients.len();
                self.patients.push(Patient::new(id));
                self.id_to_index.insert(id.to_string(), index);
                index
            }
        };
        &mut self.patients[index]
    }

    /// Link a known phenotype to a patient, creating the patient if needed
    ///
    /// Returns `false`, leaving the patient without the link, when `code` is not
    /// a loaded phenotype.
    pub fn link_phenotype(&mut self, patient_id: &str, code: &str) -> bool {
        let phenotype = self.code_to_index.get(code).copied();
        let patient = self.patient_entry(patient_id);
        match phenotype {
            Some(index) => {
                patient.add_phenotype(index);
                true
            }
            None => false,
        }
    }

    /// Append a variant to the global list and to its patient's list
    ///
    /// Returns `false` when the variant's patient is not in the catalog; the
    /// variant is still kept as an orphan.
    pub fn add_variant(&mut self, variant: Variant) -> bool {
        let index = self.variants.len();
        let patient = self.id_to_index.get(&variant.patient_id).copied();
        self.variants.push(variant);
        match patient {
            Some(patient) => {
                self.patients[patient].add_variant(index);
                true
            }
            None => false,
        }
    }

    /// Get a phenotype by code
    pub fn phenotype(&self, code: &str) -> Option<&Phenotype> {
        self.code_to_index
            .get(code)
            .map(|&idx| &self.phenotypes[idx])
    }

    /// Get a patient by record id
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.id_to_index.get(id).map(|&idx| &self.patients[idx])
    }

    /// All phenotypes in first-seen order
    pub fn phenotypes(&self) -> &[Phenotype] {
        &self.phenotypes
    }

    /// All patients in first-seen order
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All variants in load order, orphans included
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Phenotypes linked to `patient`, in link order
    pub fn phenotypes_of<'a>(
        &'a self,
        patient: &'a Patient,
    ) -> impl Iterator<Item = &'a Phenotype> + 'a {
        patient.phenotypes.iter().map(|&idx| &self.phenotypes[idx])
    }

    /// Variants of `patient`, in load order
    pub fn variants_of<'a>(
        &'a self,
        patient: &'a Patient,
    ) -> impl Iterator<Item = &'a Variant> + 'a {
        patient.variants.iter().map(|&idx| &self.variants[idx])
    }

    /// Variants whose patient id has no patient record
    pub fn orphaned_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants
            .iter()
            .filter(|v| !self.id_to_index.contains_key(&v.patient_id))
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let patients = self
            .patients
            .iter()
            .map(|patient| ExportedPatient {
                id: patient.id.clone(),
                phenotypes: self
                    .phenotypes_of(patient)
                    .map(|p| p.code.clone())
                    .collect(),
                variants: self.variants_of(patient).cloned().collect(),
            })
            .collect();

        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            phenotypes: self.phenotypes.clone(),
            patients,
            orphaned_variants: self.orphaned_variants().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Check if nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.phenotypes.is_empty() && self.patients.is_empty() && self.variants.is_empty()
    }
}
