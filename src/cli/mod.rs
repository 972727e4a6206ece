//! Command-line interface for variant-explorer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **shell**: Interactive menu (the default when no command is given)
//! - **patients**, **genes**, **phenotypes**: Catalog listings
//! - **search**: Filter variants by patient, chromosome, gene and position
//! - **recommend**: A patient's variants in genes implied by its phenotypes
//! - **summary**: Catalog sizes and load failures
//! - **export**: Write the joined catalog as JSON
//!
//! ## Usage
//!
//! ```text
//! # Interactive menu over the default sources
//! variant-explorer
//!
//! # Explicit source locations
//! variant-explorer --phenotypes data/fenotipos.csv --patients data/pacientes.csv \
//!     --variants-dir data/VCFS genes
//!
//! # Variants on chr17 between two positions, as TSV
//! variant-explorer search --chromosome chr17 --start 43000000 --end 43200000 --format tsv
//!
//! # Phenotype-driven recommendation as JSON
//! variant-explorer recommend PAC001 --format json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::loader::{LoadReport, SourcePaths};
use crate::catalog::store::Catalog;
use crate::parsing::delimited::SourceFormat;
use crate::utils::validation::delimiter_byte;

pub mod catalog;
pub mod list;
pub mod query;
pub mod shell;

#[derive(Parser)]
#[command(name = "variant-explorer")]
#[command(version)]
#[command(about = "Explore patient variants through their phenotypes")]
#[command(
    long_about = "variant-explorer joins a phenotype catalog, a patient registry and per-patient variant files in memory.\n\nIt lets you:\n- List patients, genes and phenotypes\n- Search variants by patient, chromosome, gene and position\n- Recommend a patient's variants that fall in genes linked to its phenotypes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub sources: SourceArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu
    Shell,

    /// List patients with variant counts and phenotypes
    Patients,

    /// List genes with the number of variants in each
    Genes,

    /// List phenotypes with their gene counts
    Phenotypes,

    /// Search variants
    Search(query::SearchArgs),

    /// Recommend a patient's variants from its phenotypes
    Recommend(query::RecommendArgs),

    /// Show catalog sizes and load failures
    Summary,

    /// Export the joined catalog to a JSON file
    Export(catalog::ExportArgs),
}

/// Where the three record sources live and how they are delimited
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Phenotype source (codigo;label;uri;gene)
    #[arg(long, global = true, default_value = "fenotipos_metadatos.csv")]
    pub phenotypes: PathBuf,

    /// Patient source (expediente;fenotipo)
    #[arg(long, global = true, default_value = "pacientes_metadatos.csv")]
    pub patients: PathBuf,

    /// Directory of per-patient variant sources (PAC*.csv)
    #[arg(long, global = true, default_value = "VCFS")]
    pub variants_dir: PathBuf,

    /// File name prefix of variant sources inside --variants-dir
    #[arg(long, global = true, default_value = "PAC")]
    pub variant_prefix: String,

    /// Field delimiter of all sources
    #[arg(short, long, global = true, default_value = ";")]
    pub delimiter: char,
}

impl SourceArgs {
    /// Build the catalog from the configured sources
    ///
    /// # Errors
    ///
    /// Returns an error only for an invalid delimiter; source failures are
    /// collected in the returned report.
    pub fn load(&self, verbose: bool) -> anyhow::Result<(Catalog, LoadReport)> {
        let format = SourceFormat::default()
            .with_delimiter(delimiter_byte(self.delimiter)?)
            .with_variant_prefix(&self.variant_prefix);
        let paths = SourcePaths {
            phenotypes: self.phenotypes.clone(),
            patients: self.patients.clone(),
            variants_dir: self.variants_dir.clone(),
        };

        let (catalog, report) = Catalog::load(&paths, &format);

        if verbose {
            eprintln!(
                "Loaded {} phenotypes, {} patients and {} variants from {} sources",
                catalog.phenotypes().len(),
                catalog.patients().len(),
                catalog.variants().len(),
                report.variant_sources
            );
        }

        if !report.is_clean() {
            eprintln!(
                "Warning: {} source(s) failed to load; continuing with partial data.",
                report.failures.len()
            );
        }

        Ok((catalog, report))
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
