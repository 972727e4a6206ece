//! Readers for the delimited record sources.
//!
//! Every source is a delimited text file (`;` by default) with a header line.
//! Rows are deserialized into explicit schemas:
//!
//! | Source | Columns | Schema |
//! |--------|---------|--------|
//! | Phenotypes | `codigo`, `label`, `uri`, `gene` | [`PhenotypeRecord`](records::PhenotypeRecord) |
//! | Patients | `expediente`, `fenotipo` | [`PatientRecord`](records::PatientRecord) |
//! | Variants (`PAC*.csv`) | `chr`, `pos_start`, `pos_end`, `reference`, `genotype`, `gene_symbol` | [`VariantRecord`](records::VariantRecord) |
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use variant_explorer::parsing::delimited::{Records, SourceFormat};
//! use variant_explorer::parsing::records::PhenotypeRecord;
//!
//! let format = SourceFormat::default();
//! let rows = Records::<_, PhenotypeRecord>::open(Path::new("fenotipos_metadatos.csv"), &format).unwrap();
//! for row in rows {
//!     let row = row.unwrap();
//!     println!("{} -> {}", row.value.code, row.value.gene);
//! }
//! ```

pub mod delimited;
pub mod records;
