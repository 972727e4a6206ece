//! Core entities of the phenotype/patient/variant graph.
//!
//! - [`Phenotype`](phenotype::Phenotype): a trait descriptor with its set of genes
//! - [`Patient`](patient::Patient): a record id linked to phenotypes and variants
//! - [`Variant`](variant::Variant): one genomic observation for a patient
//!
//! Entities are created while the catalog loads and are read-only afterwards.
//! Patients refer to phenotypes and variants by index into the collections
//! owned by the catalog.

pub mod patient;
pub mod phenotype;
pub mod variant;
