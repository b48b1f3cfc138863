//! pdfdeck - Merge PDF documents and extract, reorder or split their pages.

mod cli;
mod commands;
mod output;

use std::path::Path;
use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::output::OutputFormatter;
use pdfdeck::config::OverwriteMode;
use pdfdeck::error::PdfDeckError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        OutputFormatter::default().error(&format!("Error: {err}"));
        process::exit(err.exit_code());
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "pdfdeck=debug" } else { "pdfdeck=warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfDeckError> {
    cli.validate()?;
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    tracing::debug!(?config, "Configuration resolved");

    if formatter.should_print() && !matches!(cli.command, Command::Mode { .. }) {
        formatter.section(&format!("{} v{}", pdfdeck::NAME, pdfdeck::VERSION));
        formatter.blank_line();
    }

    if config.dry_run {
        formatter.info("DRY RUN MODE - No files will be written");
    }

    match cli.command {
        Command::Merge {
            inputs,
            output,
            selections,
        } => commands::merge(&config, &formatter, &inputs, output, &selections).await,
        Command::Extract {
            input,
            pages,
            output,
        } => commands::extract(&config, &formatter, &input, &pages, output).await,
        Command::Split {
            input,
            ranges,
            out_dir,
        } => commands::split(&config, &formatter, &input, &ranges, &out_dir).await,
        Command::Thumbnails { input, out_dir, .. } => {
            commands::thumbnails(&config, &formatter, &input, &out_dir).await
        }
        Command::Info { inputs } => commands::info(&config, &formatter, &inputs).await,
        Command::Mode { mode } => commands::mode(&config, &formatter, mode.as_deref()),
    }
}

/// Decide whether `output` may be written.
pub(crate) fn handle_output_overwrite(
    output: &Path,
    overwrite_mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<(), PdfDeckError> {
    if !output.exists() {
        return Ok(());
    }

    match overwrite_mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(PdfDeckError::output_exists(output)),
        OverwriteMode::Prompt => {
            // No prompt in quiet mode; treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfDeckError::output_exists(output));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfDeckError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(PdfDeckError::Cancelled)
            }
        }
    }
}
