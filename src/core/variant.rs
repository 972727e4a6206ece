use serde::{Deserialize, Serialize};

/// One observed genomic alteration for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Patient id derived from the sub-source name
    pub patient_id: String,

    pub chromosome: String,

    pub pos_start: u64,

    pub pos_end: u64,

    /// Reference allele
    pub reference: String,

    pub genotype: String,

    /// HGNC gene symbol the variant falls in
    pub gene_symbol: String,
}

impl Variant {
    pub fn new(
        patient_id: impl Into<String>,
        chromosome: impl Into<String>,
        pos_start: u64,
        pos_end: u64,
        reference: impl Into<String>,
        genotype: impl Into<String>,
        gene_symbol: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            chromosome: chromosome.into(),
            pos_start,
            pos_end,
            reference: reference.into(),
            genotype: genotype.into(),
            gene_symbol: gene_symbol.into(),
        }
    }
}

/// Renders as `chr:start:end:reference:genotype (gene)`
impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{} ({})",
            self.chromosome,
            self.pos_start,
            self.pos_end,
            self.reference,
            self.genotype,
            self.gene_symbol
        )
    }
}
