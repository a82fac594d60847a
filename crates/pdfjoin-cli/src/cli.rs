//! CLI argument parsing for pdfjoin.
//!
//! Pure `clap` definitions plus the translation into a library [`Config`].
//! `build.rs` includes this file to render the man page, so it only depends
//! on `clap` and `pdfjoin`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use pdfjoin::config::{CompressionLevel, Config, MoveOp, OverwriteMode, parse_position};
use pdfjoin::error::Result;
use pdfjoin::utils::collect_paths_for_patterns;

/// Collect PDF files, arrange their order and join them into one document.
///
/// Each input contributes all of its pages as one contiguous section of the
/// output, in the order the inputs end up in after any removals and moves.
#[derive(Parser, Debug)]
#[command(name = "pdfjoin")]
#[command(version)]
#[command(about = "Collect PDF files, arrange their order and join them into one document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge files in one go
    ///
    /// Examples:
    ///   pdfjoin merge cover.pdf chapter*.pdf -o book.pdf
    ///   pdfjoin merge a.pdf b.pdf c.pdf --move 3:1 -o out.pdf
    Merge(MergeArgs),

    /// Start an interactive session that reads commands from stdin
    ///
    /// Type `help` inside the session for the list of commands.
    Shell(ShellArgs),
}

/// Arguments of `pdfjoin merge`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns (in order)
    ///
    /// Patterns are expanded in the order given; matches of one pattern are
    /// sorted by name.
    #[arg(required = true, value_name = "FILE|GLOB")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Remove the input at this position before merging (1-based, repeatable)
    ///
    /// Removals are applied in the order given, each against the list left
    /// by the previous one.
    #[arg(long = "remove", value_name = "POS")]
    pub removals: Vec<String>,

    /// Move the input at FROM to TO before merging (1-based, repeatable)
    ///
    /// Moves are applied after all removals, in the order given.
    #[arg(long = "move", value_name = "FROM:TO")]
    pub moves: Vec<String>,

    /// Title written to the output document
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Compression level for output PDF
    ///
    /// - none: streams are written as read
    /// - standard: compress streams (default)
    /// - maximum: also drop unreferenced objects
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Dry run - read and check every input without creating output
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - list inputs and show statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Skip inputs that cannot be read instead of stopping
    ///
    /// Inputs that are read but are not valid PDFs still stop the merge.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Number of files read concurrently (default: number of CPU cores)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl MergeArgs {
    /// Convert the arguments into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns an error for malformed patterns, positions or moves, and for
    /// anything [`Config::validate`] rejects.
    pub fn to_config(&self) -> Result<Config> {
        let inputs = collect_paths_for_patterns(&self.inputs)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            overwrite_mode,
            compression: CompressionLevel::from_str(&self.compression)?,
            title: self.title.clone(),
            continue_on_error: self.continue_on_error,
            jobs: self.jobs,
            removals: self
                .removals
                .iter()
                .map(|pos| parse_position(pos))
                .collect::<Result<_>>()?,
            moves: self
                .moves
                .iter()
                .map(|op| MoveOp::from_str(op))
                .collect::<Result<_>>()?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Arguments of `pdfjoin shell`.
#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Title written to merged documents
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Compression level for merged documents
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Number of files read concurrently by `add`
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Do not print the prompt or informational messages
    #[arg(short, long)]
    pub quiet: bool,
}

impl ShellArgs {
    /// Settings for the session, expressed as a [`Config`] with no inputs.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown compression level, zero jobs, or a
    /// blank title.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = Config::new(Vec::new(), PathBuf::new());
        config.compression = CompressionLevel::from_str(&self.compression)?;
        config.title = self.title.clone();
        config.jobs = self.jobs;
        config.quiet = self.quiet;

        if config.jobs == Some(0) {
            return Err(pdfjoin::PdfJoinError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }
        if config.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(pdfjoin::PdfJoinError::invalid_config("Title cannot be blank"));
        }

        Ok(config)
    }
}
