use serde::{Deserialize, Serialize};

/// A subject identified by its record number (`expediente`)
///
/// Phenotypes and variants are not stored inline: the patient keeps indices into
/// the phenotype and variant collections owned by the
/// [`Catalog`](crate::catalog::store::Catalog), so a phenotype shared by many
/// patients exists exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Record identifier
    pub id: String,

    /// Indices of linked phenotypes, in link order (duplicates allowed)
    pub phenotypes: Vec<usize>,

    /// Indices of this patient's variants, in load order
    pub variants: Vec<usize>,
}

impl Patient {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phenotypes: Vec::new(),
            variants: Vec::new(),
        }
    }

    pub fn add_phenotype(&mut self, phenotype: usize) {
        self.phenotypes.push(phenotype);
    }

    pub fn add_variant(&mut self, variant: usize) {
        self.variants.push(variant);
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }
}
