use clap::Parser;
use tracing_subscriber::EnvFilter;

use variant_explorer::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("variant_explorer=debug,info")
    } else {
        EnvFilter::new("variant_explorer=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let (catalog, report) = cli.sources.load(cli.verbose)?;

    match cli.command.unwrap_or(cli::Commands::Shell) {
        cli::Commands::Shell => cli::shell::run(&catalog)?,
        cli::Commands::Patients => {
            cli::list::write_patients(&mut std::io::stdout().lock(), &catalog, cli.format)?;
        }
        cli::Commands::Genes => {
            cli::list::write_genes(&mut std::io::stdout().lock(), &catalog, cli.format)?;
        }
        cli::Commands::Phenotypes => {
            cli::list::write_phenotypes(&mut std::io::stdout().lock(), &catalog, cli.format)?;
        }
        cli::Commands::Search(args) => cli::query::run_search(&catalog, args, cli.format)?,
        cli::Commands::Recommend(args) => {
            cli::query::run_recommend(&catalog, args, cli.format, cli.verbose)?;
        }
        cli::Commands::Summary => cli::catalog::run_summary(&catalog, &report, cli.format)?,
        cli::Commands::Export(args) => cli::catalog::run_export(&catalog, args)?,
    }

    Ok(())
}
