use clap::Args;
use tracing::debug;

use crate::catalog::query::VariantQuery;
use crate::catalog::store::Catalog;
use crate::cli::list::write_variants;
use crate::cli::OutputFormat;
use crate::core::variant::Variant;

#[derive(Args)]
pub struct SearchArgs {
    /// Only variants of this patient
    #[arg(long)]
    pub patient: Option<String>,

    /// Only variants on this chromosome (exact name, e.g. "chr1")
    #[arg(long)]
    pub chromosome: Option<String>,

    /// Drop variants starting before this position
    #[arg(long)]
    pub start: Option<u64>,

    /// Drop variants ending after this position
    #[arg(long)]
    pub end: Option<u64>,

    /// Only variants in this gene
    #[arg(long)]
    pub gene: Option<String>,
}

impl From<SearchArgs> for VariantQuery {
    fn from(args: SearchArgs) -> Self {
        Self {
            patient_id: args.patient,
            chromosome: args.chromosome,
            pos_start: args.start,
            pos_end: args.end,
            gene: args.gene,
        }
    }
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Patient record id
    #[arg(required = true)]
    pub patient: String,
}

/// Execute search subcommand
///
/// # Errors
///
/// Returns an error if writing the results fails.
pub fn run_search(
    catalog: &Catalog,
    args: SearchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let query = VariantQuery::from(args);
    if query.is_unconstrained() {
        debug!("No search criteria given; listing every variant");
    }
    let variants: Vec<&Variant> = catalog.search_variants(query).collect();
    debug!("Search matched {} variants", variants.len());

    if variants.is_empty() {
        eprintln!("No matching variants found.");
    }

    let mut out = std::io::stdout().lock();
    write_variants(&mut out, &variants, format)
}

/// Execute recommend subcommand
///
/// # Errors
///
/// Returns an error if the patient is not in the catalog or writing fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_recommend(
    catalog: &Catalog,
    args: RecommendArgs,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        let genes: Vec<&str> = catalog.relevant_genes(&args.patient)?.into_iter().collect();
        eprintln!("Relevant genes for {}: {}", args.patient, genes.join(", "));
    }

    let variants: Vec<&Variant> = catalog.recommend_variants(&args.patient)?.collect();
    debug!(
        "Recommended {} variants for {}",
        variants.len(),
        args.patient
    );

    let mut out = std::io::stdout().lock();
    write_variants(&mut out, &variants, format)
}
