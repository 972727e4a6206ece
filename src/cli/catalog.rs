use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use crate::catalog::loader::LoadReport;
use crate::catalog::store::Catalog;
use crate::cli::list::write_json;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct ExportArgs {
    /// Output file path
    #[arg(required = true)]
    pub output: PathBuf,
}

/// Execute summary subcommand: collection sizes and load failures
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_summary(
    catalog: &Catalog,
    report: &LoadReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    write_summary(&mut out, catalog, report, format)
}

fn write_summary(
    out: &mut impl Write,
    catalog: &Catalog,
    report: &LoadReport,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let summary = catalog.summary();
    match format {
        OutputFormat::Text => {
            writeln!(out, "Catalog Summary")?;
            writeln!(out, "{}", "=".repeat(40))?;
            writeln!(out, "Phenotypes:        {}", summary.phenotypes)?;
            writeln!(out, "Patients:          {}", summary.patients)?;
            writeln!(out, "Variants:          {}", summary.variants)?;
            writeln!(out, "Orphaned variants: {}", summary.orphaned_variants)?;
            writeln!(out, "Distinct genes:    {}", summary.distinct_genes)?;
            writeln!(out, "Variant sources:   {}", report.variant_sources)?;

            if !report.failures.is_empty() {
                writeln!(out, "\nLoad failures ({}):", report.failures.len())?;
                for failure in &report.failures {
                    writeln!(out, "  - {failure}")?;
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "summary": summary,
                "load": report,
            });
            write_json(out, &json)?;
        }
        OutputFormat::Tsv => {
            writeln!(
                out,
                "phenotypes\tpatients\tvariants\torphaned_variants\tdistinct_genes\tvariant_sources\tfailures"
            )?;
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                summary.phenotypes,
                summary.patients,
                summary.variants,
                summary.orphaned_variants,
                summary.distinct_genes,
                report.variant_sources,
                report.failures.len()
            )?;
        }
    }
    Ok(())
}

/// Execute export subcommand: write the joined catalog as JSON
///
/// # Errors
///
/// Returns an error if serialization fails or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run_export(catalog: &Catalog, args: ExportArgs) -> anyhow::Result<()> {
    let json = catalog.to_json()?;
    std::fs::write(&args.output, json)?;
    eprintln!(
        "Exported {} patients and {} variants to {}",
        catalog.patients().len(),
        catalog.variants().len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::Variant;
    use crate::parsing::delimited::SourceError;

    #[test]
    fn test_summary_text_lists_failures() {
        let mut catalog = Catalog::new();
        catalog.add_variant(Variant::new("PT1", "chr1", 1, 2, "A", "AA", "GENE_A"));
        let report = LoadReport {
            failures: vec![SourceError::NotFound {
                path: PathBuf::from("pacientes.csv"),
            }],
            ..LoadReport::default()
        };

        let mut out = Vec::new();
        write_summary(&mut out, &catalog, &report, OutputFormat::Text).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Variants:          1"));
        assert!(text.contains("Orphaned variants: 1"));
        assert!(text.contains("Load failures (1):"));
        assert!(text.contains("  - Source not found: pacientes.csv"));
    }

    #[test]
    fn test_summary_json() {
        let catalog = Catalog::new();
        let report = LoadReport::default();

        let mut out = Vec::new();
        write_summary(&mut out, &catalog, &report, OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["summary"]["variants"], 0);
        assert!(json["load"]["failures"].as_array().unwrap().is_empty());
    }
}
