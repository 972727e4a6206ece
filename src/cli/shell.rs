//! Interactive menu over a loaded catalog.
//!
//! ```text
//! 1. List patients      -> 1. Search variants
//! 2. List genes            2. Recommend variants
//! 3. List phenotypes       3. Go back
//! 4. Exit program
//! ```
//!
//! Blank answers to the search prompts mean "no filter". End of input leaves
//! the shell from any menu.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::catalog::query::VariantQuery;
use crate::catalog::store::{Catalog, CatalogError};
use crate::cli::list::{write_genes, write_patients, write_phenotypes, write_variants};
use crate::cli::OutputFormat;
use crate::core::variant::Variant;
use crate::utils::validation::{non_blank, parse_position};

enum Flow {
    Continue,
    Quit,
}

/// Menu loop reading answers from `input` and writing to `output`
pub struct Shell<'a, R, W> {
    catalog: &'a Catalog,
    input: R,
    output: W,
}

/// Run the shell on stdin/stdout until the user exits
///
/// # Errors
///
/// Returns an error only if the terminal cannot be read or written.
pub fn run(catalog: &Catalog) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Shell::new(catalog, stdin.lock(), stdout.lock()).run()
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(catalog: &'a Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Consume the shell and return its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the main menu until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        if self.catalog.is_empty() {
            writeln!(
                self.output,
                "No data loaded. Check the phenotype, patient and variant source locations."
            )?;
        }

        loop {
            writeln!(self.output, "\n1. List patients")?;
            writeln!(self.output, "2. List genes")?;
            writeln!(self.output, "3. List phenotypes")?;
            writeln!(self.output, "4. Exit program")?;

            let Some(choice) = self.prompt("Choose an option (1-4): ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => {
                    write_patients(&mut self.output, self.catalog, OutputFormat::Text)?;
                    self.patient_menu()?
                }
                "2" => {
                    write_genes(&mut self.output, self.catalog, OutputFormat::Text)?;
                    Flow::Continue
                }
                "3" => {
                    write_phenotypes(&mut self.output, self.catalog, OutputFormat::Text)?;
                    Flow::Continue
                }
                "4" => Flow::Quit,
                _ => {
                    writeln!(self.output, "ERROR. You must enter a number between 1 and 4.")?;
                    Flow::Continue
                }
            };

            if matches!(flow, Flow::Quit) {
                break;
            }
        }

        writeln!(self.output, "Program terminated")?;
        self.output.flush()?;
        Ok(())
    }

    fn patient_menu(&mut self) -> anyhow::Result<Flow> {
        loop {
            writeln!(self.output, "\n1. Search variants")?;
            writeln!(self.output, "2. Recommend variants")?;
            writeln!(self.output, "3. Go back")?;

            let Some(choice) = self.prompt("Choose an option (1-3): ")? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice.trim() {
                "1" => self.search()?,
                "2" => self.recommend()?,
                "3" => return Ok(Flow::Continue),
                _ => {
                    writeln!(
                        self.output,
                        "ERROR. You must enter a number between 1 and 3 in the submenu."
                    )?;
                    Flow::Continue
                }
            };

            if matches!(flow, Flow::Quit) {
                return Ok(Flow::Quit);
            }
        }
    }

    fn search(&mut self) -> anyhow::Result<Flow> {
        let mut answers = Vec::with_capacity(5);
        for label in [
            "Patient code: ",
            "Chromosome: ",
            "Start position: ",
            "End position: ",
            "Gene: ",
        ] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::Quit),
            }
        }

        let (pos_start, pos_end) = match (parse_position(&answers[2]), parse_position(&answers[3])) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(e), _) | (_, Err(e)) => {
                writeln!(self.output, "ERROR. {e}")?;
                return Ok(Flow::Continue);
            }
        };

        let query = VariantQuery {
            patient_id: non_blank(&answers[0]),
            chromosome: non_blank(&answers[1]),
            pos_start,
            pos_end,
            gene: non_blank(&answers[4]),
        };
        if query.is_unconstrained() {
            debug!("Shell search without criteria; listing every variant");
        } else {
            debug!("Shell search: {query:?}");
        }

        let variants: Vec<&Variant> = self.catalog.search_variants(query).collect();
        if variants.is_empty() {
            writeln!(self.output, "No matching variants found.")?;
        } else {
            write_variants(&mut self.output, &variants, OutputFormat::Text)?;
        }
        Ok(Flow::Continue)
    }

    fn recommend(&mut self) -> anyhow::Result<Flow> {
        let Some(answer) = self.prompt("Patient code: ")? else {
            return Ok(Flow::Quit);
        };
        let patient_id = answer.trim();

        match self.catalog.recommend_variants(patient_id) {
            Ok(variants) => {
                let variants: Vec<&Variant> = variants.collect();
                debug!("Recommended {} variants for {patient_id}", variants.len());
                write_variants(&mut self.output, &variants, OutputFormat::Text)?;
            }
            Err(CatalogError::PatientNotFound(_)) => {
                writeln!(self.output, "Patient not found")?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }

    /// Print `label` and read one line; `None` at end of input
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .phenotype_entry("P1", "Label1", "uri1")
            .add_gene("GENE_A");
        catalog.link_phenotype("PT1", "P1");
        catalog.add_variant(Variant::new("PT1", "chr1", 100, 200, "A", "AA", "GENE_A"));
        catalog.add_variant(Variant::new("PT1", "chr2", 300, 400, "G", "GT", "GENE_B"));
        catalog
    }

    fn session(catalog: &Catalog, input: &str) -> String {
        let mut shell = Shell::new(catalog, input.as_bytes(), Vec::new());
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[test]
    fn test_exit() {
        let output = session(&catalog(), "4\n");
        assert!(!output.contains("No data loaded."));
        assert!(output.contains("4. Exit program"));
        assert!(output.ends_with("Program terminated\n"));
    }

    #[test]
    fn test_eof_exits() {
        let output = session(&catalog(), "");
        assert!(output.ends_with("Program terminated\n"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let output = session(&catalog(), "9\n4\n");
        assert!(output.contains("ERROR. You must enter a number between 1 and 4."));
        assert_eq!(output.matches("Choose an option (1-4): ").count(), 2);
    }

    #[test]
    fn test_list_genes_and_phenotypes() {
        let output = session(&catalog(), "2\n3\n4\n");
        assert!(output.contains("GENE_A (1)\nGENE_B (1)\n"));
        assert!(output.contains("Label1 (P1) [Gene Count: 1]\n"));
    }

    #[test]
    fn test_search_with_blank_criteria() {
        let output = session(&catalog(), "1\n1\n\n\n\n\n\n3\n4\n");
        assert!(output.contains("PT1 (Variants: 2)\n  - Label1 (P1) [Gene Count: 1]\n"));
        assert!(output.contains("chr1:100:200:A:AA (GENE_A)\nchr2:300:400:G:GT (GENE_B)\n"));
    }

    #[test]
    fn test_search_by_gene() {
        let output = session(&catalog(), "1\n1\n\n\n\n\nGENE_B\n3\n4\n");
        assert!(output.contains("chr2:300:400:G:GT (GENE_B)"));
        assert!(!output.contains("chr1:100:200:A:AA (GENE_A)"));
    }

    #[test]
    fn test_search_invalid_position() {
        let output = session(&catalog(), "1\n1\n\n\nabc\n\n\n3\n4\n");
        assert!(output.contains("ERROR. Invalid position 'abc'"));
        assert!(output.ends_with("Program terminated\n"));
    }

    #[test]
    fn test_search_negative_bound() {
        let output = session(&catalog(), "1\n1\n\n\n\n-1\n\n3\n4\n");
        assert!(output.contains("ERROR. Position bounds must be non-negative, got -1"));
        assert!(!output.contains("chr1:100:200:A:AA (GENE_A)"));
    }

    #[test]
    fn test_search_no_matches() {
        let output = session(&catalog(), "1\n1\n\nchr9\n\n\n\n3\n4\n");
        assert!(output.contains("No matching variants found."));
    }

    #[test]
    fn test_recommend() {
        let output = session(&catalog(), "1\n2\nPT1\n3\n4\n");
        assert!(output.contains("chr1:100:200:A:AA (GENE_A)\n"));
        assert!(!output.contains("chr2:300:400:G:GT (GENE_B)"));
    }

    #[test]
    fn test_recommend_unknown_patient_returns_to_menu() {
        let output = session(&catalog(), "1\n2\nNOPE\n3\n4\n");
        assert!(output.contains("Patient not found"));
        assert!(output.ends_with("Program terminated\n"));
    }

    #[test]
    fn test_eof_in_submenu_exits() {
        let output = session(&catalog(), "1\n1\nPT1\n");
        assert!(output.ends_with("Program terminated\n"));
    }

    #[test]
    fn test_empty_catalog_is_usable() {
        let output = session(&Catalog::new(), "1\n1\n\n\n\n\n\n2\nPT1\n3\n2\n3\n4\n");
        assert!(output.starts_with("No data loaded."));
        assert!(output.contains("No matching variants found."));
        assert!(output.contains("Patient not found"));
        assert!(output.ends_with("Program terminated\n"));
    }
}
