//! pdfjoin - Collect PDF documents, arrange them, and join them into one.
//!
//! The library keeps an ordered collection of in-memory documents that a user
//! edits (add, remove, move, clear) and merges on demand into a single PDF
//! whose pages follow the collection order. It provides:
//!
//! - An ordered document collection with index-checked edits
//! - A merge engine over lopdf that preserves each source's page tree
//! - A session type that serializes merges and snapshots the order
//! - Async file ingestion and atomic output writing
//!
//! # Examples
//!
//! ## Merge in-memory documents
//!
//! ```no_run
//! use pdfjoin::{DocumentEntry, Session};
//!
//! # async fn example(a: Vec<u8>, b: Vec<u8>) -> pdfjoin::Result<()> {
//! let session = Session::new();
//! session.add_entry(DocumentEntry::new("a.pdf", a));
//! session.add_entry(DocumentEntry::new("b.pdf", b));
//! session.move_to(1, 0)?;
//!
//! let output = session.merge().await?;
//! println!("{} pages", output.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Read files and write the result
//!
//! ```no_run
//! use pdfjoin::config::OverwriteMode;
//! use pdfjoin::io::ArtifactWriter;
//! use pdfjoin::Session;
//! use std::path::PathBuf;
//!
//! # async fn example() -> pdfjoin::Result<()> {
//! let session = Session::new();
//! let paths = vec![PathBuf::from("x.pdf"), PathBuf::from("y.pdf")];
//! session.add_sources(&paths, 4, false).await?;
//!
//! let output = session.merge().await?;
//! ArtifactWriter::new(OverwriteMode::Force)
//!     .write(output.bytes, &PathBuf::from("joined.pdf"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod collection;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use collection::{DocumentCollection, DocumentEntry, ListingEntry};
pub use config::Config;
pub use error::{PdfJoinError, Result};
pub use merge::{MergeOptions, MergeOutput, Merger};
pub use session::Session;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
