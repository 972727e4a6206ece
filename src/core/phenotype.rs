use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A clinical trait descriptor and the genes associated with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phenotype {
    /// Unique phenotype code (`codigo` column)
    pub code: String,

    /// Human readable label
    pub label: String,

    /// Ontology URI for the term
    pub uri: String,

    /// Genes associated with this phenotype
    #[serde(default)]
    pub genes: BTreeSet<String>,
}

impl Phenotype {
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            uri: uri.into(),
            genes: BTreeSet::new(),
        }
    }

    /// Add a gene; adding a gene that is already present is a no-op
    pub fn add_gene(&mut self, gene: impl Into<String>) {
        self.genes.insert(gene.into());
    }

    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }
}

impl std::fmt::Display for Phenotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) [Gene Count: {}]",
            self.label,
            self.code,
            self.gene_count()
        )
    }
}
