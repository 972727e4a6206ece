//! # variant-explorer
//!
//! An in-memory join of phenotypes, patients and genetic variants, with the
//! queries a clinical geneticist needs to triage a cohort.
//!
//! Three delimited sources are loaded into a [`Catalog`]:
//!
//! - a phenotype source mapping phenotype codes to labels, URIs and genes
//! - a patient source linking record ids to phenotype codes
//! - one variant source per patient (`PAC*.csv`)
//!
//! The catalog can then be queried:
//!
//! - **Search**: filter all variants by patient, chromosome, gene and position bounds
//! - **Recommend**: a patient's variants that fall in genes associated with
//!   that patient's phenotypes
//! - **Gene tally**: number of variants per gene
//! - **Listings**: patients with variant counts, phenotypes with gene counts
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//! use variant_explorer::parsing::delimited::SourceFormat;
//! use variant_explorer::Catalog;
//!
//! let format = SourceFormat::default();
//! let mut catalog = Catalog::new();
//! catalog
//!     .load_phenotypes_from(Path::new("fenotipos.csv"), "codigo;label;uri;gene\nP1;Label1;uri1;GENE_A\n".as_bytes(), &format)
//!     .unwrap();
//! catalog
//!     .load_patients_from(Path::new("pacientes.csv"), "expediente;fenotipo\nPT1;P1\n".as_bytes(), &format)
//!     .unwrap();
//! catalog.add_variant(variant_explorer::Variant::new("PT1", "chr1", 100, 200, "A", "AA", "GENE_A"));
//!
//! let recommended: Vec<String> = catalog
//!     .recommend_variants("PT1")
//!     .unwrap()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(recommended, vec!["chr1:100:200:A:AA (GENE_A)"]);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog storage, loading and queries
//! - [`core`]: Phenotype, patient and variant entities
//! - [`parsing`]: Delimited record sources and their schemas
//! - [`cli`]: Command-line interface and interactive shell
//! - [`utils`]: Input validation helpers

pub mod catalog;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::loader::{LoadReport, SourcePaths};
pub use catalog::query::VariantQuery;
pub use catalog::store::{Catalog, CatalogError};
pub use core::patient::Patient;
pub use core::phenotype::Phenotype;
pub use core::variant::Variant;
pub use parsing::delimited::{SourceError, SourceFormat};
