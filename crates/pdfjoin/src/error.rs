//! Error types for pdfjoin.
//!
//! Every fallible operation in the crate returns [`PdfJoinError`]. Errors carry
//! enough context to be shown to a user directly: a decode failure names the
//! entry and its position in the collection, an index error names the
//! offending index and the collection length.
//!
//! # Error Categories
//!
//! - **Collection Errors**: out-of-range positions
//! - **Merge Errors**: empty input, undecodable entries, serialization failures
//! - **I/O Errors**: reading sources, writing the merged artifact
//! - **Usage Errors**: invalid configuration or shell commands

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfjoin operations.
pub type Result<T> = std::result::Result<T, PdfJoinError>;

/// Main error type for pdfjoin operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfJoinError {
    /// A position passed to the collection is outside `0..len`.
    #[error("Position {index} is out of range for a collection of {len} document(s)")]
    IndexOutOfRange {
        /// The rejected position.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },

    /// A merge was requested on an empty collection.
    #[error("No documents to merge. Add at least one PDF first")]
    NoFilesToMerge,

    /// One entry could not be decoded as a PDF document.
    #[error("Cannot read '{name}' (position {position}) as a PDF document\n  Reason: {reason}")]
    DecodeFailed {
        /// Name of the offending entry.
        name: String,
        /// Zero-based position of the entry in the merged sequence.
        position: usize,
        /// Decoder message.
        reason: String,
    },

    /// The merged document could not be serialized.
    #[error("Failed to produce the merged document: {reason}")]
    SerializeFailed {
        /// Details about the failure.
        reason: String,
    },

    /// Another merge is still running on the same session.
    #[error("A merge is already in progress")]
    MergeInProgress,

    /// Source file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// The rejected path.
        path: PathBuf,
    },

    /// Reading a source file failed.
    #[error("Failed to read source file: {}\n  Reason: {source}", path.display())]
    FailedToReadSource {
        /// Path to the source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Output file already exists and overwriting is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Writing the merged artifact failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// A shell command could not be understood.
    #[error("Invalid command '{input}': {reason}")]
    InvalidCommand {
        /// The command line as typed.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<glob::PatternError> for PdfJoinError {
    fn from(err: glob::PatternError) -> Self {
        Self::invalid_config(format!("Invalid input pattern: {err}"))
    }
}

impl From<glob::GlobError> for PdfJoinError {
    fn from(err: glob::GlobError) -> Self {
        Self::failed_to_read(err.path().to_path_buf(), err.error())
    }
}

impl PdfJoinError {
    /// Create an IndexOutOfRange error.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a DecodeFailed error.
    pub fn decode_failed(name: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        Self::DecodeFailed {
            name: name.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Create a SerializeFailed error.
    pub fn serialize_failed(reason: impl Into<String>) -> Self {
        Self::SerializeFailed {
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidCommand error.
    pub fn invalid_command(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a FailedToReadSource error from a borrowed I/O error.
    ///
    /// The kind and message are copied, since some callers only lend the
    /// underlying error.
    pub fn failed_to_read(path: PathBuf, err: &io::Error) -> Self {
        Self::FailedToReadSource {
            path,
            source: io::Error::new(err.kind(), err.to_string()),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Name and position of the entry this error refers to, if any.
    pub fn offending_entry(&self) -> Option<(&str, usize)> {
        match self {
            Self::DecodeFailed { name, position, .. } => Some((name.as_str(), *position)),
            _ => None,
        }
    }

    /// Check whether the user can fix this error by changing their input.
    ///
    /// Serialization failures and unexpected I/O are defects, not input problems.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(
            self,
            Self::SerializeFailed { .. } | Self::Io { .. } | Self::Other { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::IndexOutOfRange { .. } => 1,
            Self::NoFilesToMerge => 1,
            Self::InvalidConfig { .. } => 1,
            Self::InvalidCommand { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadSource { .. } => 2,
            Self::DecodeFailed { .. } => 3,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::Io { .. } => 5,
            Self::SerializeFailed { .. } => 6,
            Self::MergeInProgress => 7,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Other { .. } => 1,
        }
    }
}
