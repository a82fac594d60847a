//! I/O operations for pdfjoin.
//!
//! This module handles the two places the crate touches the filesystem:
//! - Reading source files into collection entries
//! - Writing the merged artifact to disk
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::config::OverwriteMode;
//! use pdfjoin::io::{ArtifactWriter, SourceReader};
//! use pdfjoin::merge::merge_entries;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let entry = SourceReader::new().read(Path::new("input.pdf")).await?;
//! let output = merge_entries(&[entry])?;
//!
//! let writer = ArtifactWriter::new(OverwriteMode::NoClobber);
//! writer.write(output.bytes, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{IngestStatistics, ReadResult, SourceReader};
pub use writer::{ArtifactWriter, WriteStatistics};
