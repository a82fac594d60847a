//! Configuration module for pdfjoin.
//!
//! This module holds the validated, normalized settings that drive a merge
//! run. Front ends (the CLI, the interactive shell) translate their own
//! arguments into a [`Config`] and hand it to the library. It handles:
//! - Validation of argument combinations
//! - Application of defaults
//! - The edit script applied to the collection before merging

use std::{path::PathBuf, str::FromStr};

use crate::error::{PdfJoinError, Result};
use crate::merge::{MergeOptions, OutputMetadata};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as decoded from the inputs.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop objects no page references.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfJoinError;

    /// Parse compression level from `"none"`, `"standard"` or `"maximum"`.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfJoinError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// A reorder request: move the entry at `from` to `to` (zero-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOp {
    /// Current position of the entry.
    pub from: usize,
    /// Target position, counted after the entry is taken out.
    pub to: usize,
}

impl FromStr for MoveOp {
    type Err = PdfJoinError;

    /// Parse `"FROM:TO"` with 1-based positions, as shown in listings.
    fn from_str(s: &str) -> Result<Self> {
        let (from, to) = s.split_once(':').ok_or_else(|| {
            PdfJoinError::invalid_config(format!("Invalid move '{s}'. Expected FROM:TO, e.g. 3:1"))
        })?;

        Ok(Self {
            from: parse_position(from)?,
            to: parse_position(to)?,
        })
    }
}

/// Parse a 1-based position as typed by a user into a zero-based index.
///
/// # Errors
///
/// Returns an error for non-numeric input and for `0`.
pub fn parse_position(s: &str) -> Result<usize> {
    let position: usize = s
        .trim()
        .parse()
        .map_err(|_| PdfJoinError::invalid_config(format!("Invalid position: '{}'", s.trim())))?;

    position
        .checked_sub(1)
        .ok_or_else(|| PdfJoinError::invalid_config("Positions start at 1"))
}

/// Complete configuration for a merge run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input PDF file paths (in presentation order).
    pub inputs: Vec<PathBuf>,

    /// Output PDF file path.
    pub output: PathBuf,

    /// Dry run mode - decode inputs and report without creating output.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// Title written to the output document. `None` uses the default title.
    pub title: Option<String>,

    /// Skip unreadable source files instead of stopping.
    pub continue_on_error: bool,

    /// Number of concurrent source reads (None = auto-detect).
    pub jobs: Option<usize>,

    /// Positions to remove after ingestion, applied in order.
    pub removals: Vec<usize>,

    /// Reorder requests applied after removals, in order.
    pub moves: Vec<MoveOp>,
}

impl Config {
    /// Create a configuration with defaults for everything but inputs and output.
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            dry_run: false,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            compression: CompressionLevel::default(),
            title: None,
            continue_on_error: false,
            jobs: None,
            removals: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - The output path is also an input
    /// - The title is blank
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(PdfJoinError::invalid_config("No input files specified"));
        }

        if self.verbose && self.quiet {
            return Err(PdfJoinError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.jobs == Some(0) {
            return Err(PdfJoinError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if let Some(input) = self.inputs.iter().find(|input| **input == self.output) {
            return Err(PdfJoinError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                input.display()
            )));
        }

        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(PdfJoinError::invalid_config("Title cannot be blank"));
        }

        Ok(())
    }

    /// Get the effective number of concurrent reads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if progress output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }

    /// Merge options derived from this configuration.
    pub fn merge_options(&self) -> MergeOptions {
        let mut metadata = OutputMetadata::default();
        if let Some(title) = &self.title {
            metadata.title = title.trim().to_string();
        }

        MergeOptions {
            compression: self.compression,
            metadata,
        }
    }
}
