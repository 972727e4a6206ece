//! The in-memory catalog joining phenotypes, patients and variants.
//!
//! The catalog is built once from three delimited sources, in dependency order:
//!
//! 1. **Phenotypes**: one row per (phenotype, gene) pair; rows sharing a code are
//!    merged and the first row's label and URI win
//! 2. **Patients**: one row per (patient, phenotype) link; unknown phenotype
//!    codes are skipped
//! 3. **Variants**: one `PAC*.csv` source per patient in a directory; variants of
//!    patients missing from the patient source are kept as orphans
//!
//! Loading never aborts. A failing source stops only itself, keeps the rows it
//! produced so far, and is reported in the [`LoadReport`](loader::LoadReport).
//! Loading in a different order silently drops cross-references.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use variant_explorer::catalog::loader::SourcePaths;
//! use variant_explorer::catalog::query::VariantQuery;
//! use variant_explorer::parsing::delimited::SourceFormat;
//! use variant_explorer::Catalog;
//!
//! let paths = SourcePaths {
//!     phenotypes: PathBuf::from("fenotipos_metadatos.csv"),
//!     patients: PathBuf::from("pacientes_metadatos.csv"),
//!     variants_dir: PathBuf::from("VCFS"),
//! };
//! let (catalog, report) = Catalog::load(&paths, &SourceFormat::default());
//! for failure in &report.failures {
//!     eprintln!("{failure}");
//! }
//!
//! // Variants on chr1 ending at or before position 50000
//! let query = VariantQuery::new().with_chromosome("chr1").with_pos_end(50_000);
//! for variant in catalog.search_variants(query) {
//!     println!("{variant}");
//! }
//!
//! // Variants of PAC001 in genes implied by its phenotypes
//! if let Ok(variants) = catalog.recommend_variants("PAC001") {
//!     for variant in variants {
//!         println!("{variant}");
//!     }
//! };
//! ```

pub mod loader;
pub mod query;
pub mod store;
