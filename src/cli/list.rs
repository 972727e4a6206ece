//! Renderers for catalog listings and variant results.
//!
//! Every renderer writes to any [`Write`] so the interactive shell and the
//! one-shot subcommands print identical text.

use std::io::Write;

use crate::catalog::store::Catalog;
use crate::cli::OutputFormat;
use crate::core::variant::Variant;

/// Patients with their variant counts and linked phenotypes
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_patients(
    out: &mut impl Write,
    catalog: &Catalog,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let summaries = catalog.patient_summaries();
    match format {
        OutputFormat::Text => {
            for patient in &summaries {
                writeln!(out, "{} (Variants: {})", patient.id, patient.variant_count)?;
                for phenotype in &patient.phenotypes {
                    writeln!(
                        out,
                        "  - {} ({}) [Gene Count: {}]",
                        phenotype.label, phenotype.code, phenotype.gene_count
                    )?;
                }
                writeln!(out)?;
            }
        }
        OutputFormat::Json => write_json(out, &summaries)?,
        OutputFormat::Tsv => {
            writeln!(out, "id\tvariant_count\tphenotypes")?;
            for patient in &summaries {
                let codes: Vec<&str> = patient.phenotypes.iter().map(|p| p.code.as_str()).collect();
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    patient.id,
                    patient.variant_count,
                    codes.join(",")
                )?;
            }
        }
    }
    Ok(())
}

/// Genes with the number of variants observed in each
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_genes(
    out: &mut impl Write,
    catalog: &Catalog,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let counts = catalog.gene_counts();
    match format {
        OutputFormat::Text => {
            for gene in &counts {
                writeln!(out, "{} ({})", gene.gene, gene.count)?;
            }
        }
        OutputFormat::Json => write_json(out, &counts)?,
        OutputFormat::Tsv => {
            writeln!(out, "gene\tcount")?;
            for gene in &counts {
                writeln!(out, "{}\t{}", gene.gene, gene.count)?;
            }
        }
    }
    Ok(())
}

/// All phenotypes with their gene counts
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_phenotypes(
    out: &mut impl Write,
    catalog: &Catalog,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for phenotype in catalog.phenotypes() {
                writeln!(out, "{phenotype}")?;
            }
        }
        OutputFormat::Json => write_json(out, catalog.phenotypes())?,
        OutputFormat::Tsv => {
            writeln!(out, "code\tlabel\turi\tgene_count\tgenes")?;
            for phenotype in catalog.phenotypes() {
                let genes: Vec<&str> = phenotype.genes.iter().map(String::as_str).collect();
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    phenotype.code,
                    phenotype.label,
                    phenotype.uri,
                    phenotype.gene_count(),
                    genes.join(",")
                )?;
            }
        }
    }
    Ok(())
}

/// A list of variants, one per line in text form
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_variants(
    out: &mut impl Write,
    variants: &[&Variant],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for variant in variants {
                writeln!(out, "{variant}")?;
            }
        }
        OutputFormat::Json => write_json(out, &variants)?,
        OutputFormat::Tsv => {
            writeln!(
                out,
                "patient_id\tchr\tpos_start\tpos_end\treference\tgenotype\tgene_symbol"
            )?;
            for v in variants {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    v.patient_id,
                    v.chromosome,
                    v.pos_start,
                    v.pos_end,
                    v.reference,
                    v.genotype,
                    v.gene_symbol
                )?;
            }
        }
    }
    Ok(())
}

pub(crate) fn write_json<T: serde::Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
