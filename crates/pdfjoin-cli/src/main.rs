//! pdfjoin - Collect PDF files, arrange their order and join them into one.
//!
//! Command-line front end over the `pdfjoin` library: a one-shot `merge`
//! subcommand and an interactive `shell`.

mod cli;
mod shell;
mod telemetry;

use clap::Parser;
use std::process;
use tracing::debug;

use crate::cli::{Cli, Command, MergeArgs};
use pdfjoin::config::{Config, OverwriteMode};
use pdfjoin::error::PdfJoinError;
use pdfjoin::io::ArtifactWriter;
use pdfjoin::output::{
    OutputFormatter, display_ingest_statistics, display_listing, display_merge_result,
    display_summaries,
};
use pdfjoin::Session;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    telemetry::init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Dispatch to the selected subcommand.
async fn run(cli: Cli) -> Result<(), PdfJoinError> {
    match cli.command {
        Command::Merge(args) => run_merge(args).await,
        Command::Shell(args) => shell::run(args).await,
    }
}

/// One-shot merge: read, edit, merge, write.
async fn run_merge(args: MergeArgs) -> Result<(), PdfJoinError> {
    let config = args.to_config()?;
    let formatter = OutputFormatter::from_config(&config);
    debug!(
        inputs = config.inputs.len(),
        output = %config.output.display(),
        dry_run = config.dry_run,
        "starting merge run"
    );

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfjoin::NAME, pdfjoin::VERSION));
        formatter.blank_line();
    }

    formatter.info("Reading input files...");
    let (session, report) = Session::from_config(&config).await?;

    for (path, err) in &report.skipped {
        formatter.warning(&format!("Skipped {}: {err}", path.display()));
    }
    display_ingest_statistics(&formatter, &report.statistics);

    if formatter.is_verbose() {
        formatter.section("Merge order");
        display_listing(&formatter, &session.listing());
    }

    // Dry run mode - stop before producing anything
    if config.dry_run {
        let summaries = session.inspect().await?;
        formatter.blank_line();
        display_summaries(&formatter, &summaries);
        formatter.success("Dry run completed successfully");
        formatter.info(&format!("  Output would be: {}", config.output.display()));
        return Ok(());
    }

    let overwrite_mode = resolve_overwrite(&config, &formatter)?;

    formatter.info("Merging documents...");
    let output = session.merge().await?;

    let write_stats = ArtifactWriter::new(overwrite_mode)
        .write(output.bytes, &config.output)
        .await?;

    formatter.blank_line();
    display_merge_result(&formatter, &output.statistics, Some(&write_stats));

    Ok(())
}

/// Decide how the writer treats an existing output, asking if needed.
///
/// Returns the mode to hand to the writer: [`OverwriteMode::Force`] once the
/// user has agreed to replace the file.
fn resolve_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<OverwriteMode, PdfJoinError> {
    if !config.output.exists() {
        return Ok(config.overwrite_mode);
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(OverwriteMode::Force),
        OverwriteMode::NoClobber => Err(PdfJoinError::output_exists(config.output.clone())),
        OverwriteMode::Prompt => {
            if formatter.is_quiet() {
                // In quiet mode, treat as no-clobber
                return Err(PdfJoinError::output_exists(config.output.clone()));
            }

            formatter.warning(&format!(
                "Output file already exists: {}",
                config.output.display()
            ));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| PdfJoinError::other(format!("Failed to read input: {err}")))?;

            if is_yes(&response) {
                Ok(OverwriteMode::Force)
            } else {
                Err(PdfJoinError::Cancelled)
            }
        }
    }
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}
