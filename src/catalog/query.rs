//! Queries over a loaded catalog: variant search, phenotype-driven
//! recommendation, gene tallies and listings.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::catalog::store::{Catalog, CatalogError};
use crate::core::patient::Patient;
use crate::core::variant::Variant;

/// Search criteria for [`Catalog::search_variants`]
///
/// Every criterion is optional; `None` means "do not filter on this". A present
/// criterion holding an empty string only matches empty values.
///
/// The position bounds are one-sided: `pos_start` drops variants starting
/// before it and `pos_end` drops variants ending after it. Together they keep
/// variants lying entirely inside `[pos_start, pos_end]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantQuery {
    pub patient_id: Option<String>,
    pub chromosome: Option<String>,
    pub pos_start: Option<u64>,
    pub pos_end: Option<u64>,
    pub gene: Option<String>,
}

impl VariantQuery {
    /// A query with no criteria; matches every variant
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_patient(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    #[must_use]
    pub fn with_chromosome(mut self, chromosome: impl Into<String>) -> Self {
        self.chromosome = Some(chromosome.into());
        self
    }

    #[must_use]
    pub fn with_pos_start(mut self, pos_start: u64) -> Self {
        self.pos_start = Some(pos_start);
        self
    }

    #[must_use]
    pub fn with_pos_end(mut self, pos_end: u64) -> Self {
        self.pos_end = Some(pos_end);
        self
    }

    #[must_use]
    pub fn with_gene(mut self, gene: impl Into<String>) -> Self {
        self.gene = Some(gene.into());
        self
    }

    /// Check whether `variant` satisfies every present criterion
    #[must_use]
    pub fn matches(&self, variant: &Variant) -> bool {
        fn equals(criterion: Option<&String>, value: &str) -> bool {
            criterion.map_or(true, |c| c == value)
        }

        equals(self.patient_id.as_ref(), &variant.patient_id)
            && equals(self.chromosome.as_ref(), &variant.chromosome)
            && self.pos_start.map_or(true, |start| variant.pos_start >= start)
            && self.pos_end.map_or(true, |end| variant.pos_end <= end)
            && equals(self.gene.as_ref(), &variant.gene_symbol)
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Number of variants observed in one gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneCount {
    pub gene: String,
    pub count: usize,
}

/// A phenotype as shown in a patient listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhenotypeSummary {
    pub code: String,
    pub label: String,
    pub gene_count: usize,
}

/// A patient as shown in the patient listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub id: String,
    pub variant_count: usize,
    pub phenotypes: Vec<PhenotypeSummary>,
}

/// Collection sizes of a loaded catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub phenotypes: usize,
    pub patients: usize,
    pub variants: usize,
    pub orphaned_variants: usize,
    pub distinct_genes: usize,
}

impl Catalog {
    /// Variants matching `query`, in load order
    pub fn search_variants(&self, query: VariantQuery) -> impl Iterator<Item = &Variant> {
        self.variants().iter().filter(move |v| query.matches(v))
    }

    /// Union of the gene sets of every phenotype linked to the patient
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PatientNotFound` if the patient is not in the catalog.
    pub fn relevant_genes(&self, patient_id: &str) -> Result<BTreeSet<&str>, CatalogError> {
        let patient = self.require_patient(patient_id)?;
        Ok(self.genes_of(patient))
    }

    /// The patient's own variants that fall in a gene relevant to one of its phenotypes
    ///
    /// Variants keep the patient's load order. A patient with no phenotypes gets
    /// no recommendations.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PatientNotFound` if the patient is not in the catalog.
    pub fn recommend_variants(
        &self,
        patient_id: &str,
    ) -> Result<impl Iterator<Item = &Variant>, CatalogError> {
        let patient = self.require_patient(patient_id)?;
        let genes = self.genes_of(patient);

        Ok(self
            .variants_of(patient)
            .filter(move |v| genes.contains(v.gene_symbol.as_str())))
    }

    fn require_patient(&self, patient_id: &str) -> Result<&Patient, CatalogError> {
        self.patient(patient_id)
            .ok_or_else(|| CatalogError::PatientNotFound(patient_id.to_string()))
    }

    fn genes_of<'a>(&'a self, patient: &'a Patient) -> BTreeSet<&'a str> {
        self.phenotypes_of(patient)
            .flat_map(|p| p.genes.iter().map(String::as_str))
            .collect()
    }

    /// Variant count per gene, in order of each gene's first occurrence
    pub fn gene_counts(&self) -> Vec<GeneCount> {
        let mut counts: Vec<GeneCount> = Vec::new();
        let mut gene_to_index: HashMap<&str, usize> = HashMap::new();

        for variant in self.variants() {
            match gene_to_index.get(variant.gene_symbol.as_str()) {
                Some(&idx) => counts[idx].count += 1,
                None => {
                    gene_to_index.insert(&variant.gene_symbol, counts.len());
                    counts.push(GeneCount {
                        gene: variant.gene_symbol.clone(),
                        count: 1,
                    });
                }
            }
        }

        counts
    }

    /// Patients with their variant counts and phenotypes, in first-seen order
    pub fn patient_summaries(&self) -> Vec<PatientSummary> {
        self.patients()
            .iter()
            .map(|patient| PatientSummary {
                id: patient.id.clone(),
                variant_count: patient.variant_count(),
                phenotypes: self
                    .phenotypes_of(patient)
                    .map(|p| PhenotypeSummary {
                        code: p.code.clone(),
                        label: p.label.clone(),
                        gene_count: p.gene_count(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            phenotypes: self.phenotypes().len(),
            patients: self.patients().len(),
            variants: self.variants().len(),
            orphaned_variants: self.orphaned_variants().count(),
            distinct_genes: self.gene_counts().len(),
        }
    }
}
