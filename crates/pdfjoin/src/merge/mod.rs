//! PDF merging operations.
//!
//! This module provides the merge engine:
//! - Document decoding with failure attribution
//! - Page tree concatenation in snapshot order
//! - Output metadata rewriting
//! - Serialization with configurable compression
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::collection::DocumentEntry;
//! use pdfjoin::merge::merge_entries;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let entries = vec![
//!     DocumentEntry::new("a.pdf", std::fs::read("a.pdf")?),
//!     DocumentEntry::new("b.pdf", std::fs::read("b.pdf")?),
//! ];
//!
//! let output = merge_entries(&entries)?;
//! std::fs::write("merged.pdf", &output.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod merger;
pub mod metadata;
pub mod pages;

pub use merger::{EntrySummary, MergeOptions, MergeOutput, MergeStatistics, Merger};
pub use metadata::{DEFAULT_TITLE, DocumentInfo, MetadataManager, OutputMetadata};
pub use pages::PageTree;

use crate::collection::DocumentEntry;
use crate::error::Result;

/// Merge entries with default options.
///
/// Convenience function that creates a merger and performs the merge.
///
/// # Errors
///
/// Returns an error if any merge step fails.
pub fn merge_entries(entries: &[DocumentEntry]) -> Result<MergeOutput> {
    Merger::new().merge(entries)
}

/// Decoded page contents of a serialized PDF, in page order.
///
/// # Errors
///
/// Returns an error if `bytes` is not a readable PDF.
pub fn page_contents(bytes: &[u8]) -> Result<Vec<Vec<u8>>> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| crate::PdfJoinError::other(format!("Failed to read merged output: {e}")))?;
    Ok(PageTree::new().page_contents(&doc))
}
