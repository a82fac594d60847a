//! Core merge implementation.
//!
//! A merge is a left-to-right fold over an ordered snapshot of entries. Each
//! entry is decoded, renumbered past the objects already in the output, and
//! its page tree is attached under the output root. The first entry that
//! cannot be decoded aborts the whole merge; no partial output is produced.

use lopdf::{Document, Object};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::collection::DocumentEntry;
use crate::config::CompressionLevel;
use crate::error::{PdfJoinError, Result};
use crate::merge::metadata::{MetadataManager, OutputMetadata};
use crate::merge::pages::PageTree;
use crate::utils::format_file_size;

/// PDF version of a fresh output document. Raised to the newest input version.
const BASE_VERSION: &str = "1.5";

/// Settings applied to every merge performed by a [`Merger`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Compression applied before serialization.
    pub compression: CompressionLevel,
    /// Metadata written to the output.
    pub metadata: OutputMetadata,
}

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of documents merged.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Combined size of the inputs.
    pub input_size: u64,

    /// Size of the serialized output.
    pub output_size: u64,

    /// Time taken for decode, append and serialization.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_file_size(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_file_size(self.output_size)
    }
}

/// Successful merge: the serialized document and how it was produced.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The merged PDF.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// What a dry run learned about one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    /// Zero-based position in merge order.
    pub position: usize,
    /// Entry name.
    pub name: String,
    /// Number of pages the entry contributes.
    pub page_count: usize,
    /// PDF version declared in the header.
    pub version: String,
    /// Size of the entry in bytes.
    pub size: u64,
}

/// Stateless merge engine.
///
/// Every call to [`Merger::merge`] is independent: the same entries in the
/// same order always produce the same page content.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    options: MergeOptions,
    page_tree: PageTree,
    metadata_manager: MetadataManager,
}

impl Merger {
    /// Create a merger with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with custom options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Options this merger applies.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `entries`, in order, into one serialized PDF.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `entries` is empty ([`PdfJoinError::NoFilesToMerge`])
    /// - an entry is not a readable PDF ([`PdfJoinError::DecodeFailed`],
    ///   naming the first such entry)
    /// - the result cannot be serialized ([`PdfJoinError::SerializeFailed`])
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfjoin::collection::DocumentEntry;
    /// # use pdfjoin::merge::Merger;
    /// # fn example(entries: Vec<DocumentEntry>) -> pdfjoin::Result<()> {
    /// let output = Merger::new().merge(&entries)?;
    /// println!("{} pages, {}", output.statistics.total_pages,
    ///          output.statistics.format_output_size());
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge(&self, entries: &[DocumentEntry]) -> Result<MergeOutput> {
        let start = Instant::now();

        let document = self.merge_documents(entries)?;
        let total_pages = document.get_pages().len();
        let bytes = self.serialize(document)?;

        let statistics = MergeStatistics {
            files_merged: entries.len(),
            total_pages,
            input_size: entries.iter().map(DocumentEntry::size).sum(),
            output_size: bytes.len() as u64,
            merge_time: start.elapsed(),
        };

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            bytes = statistics.output_size,
            "merge completed"
        );

        Ok(MergeOutput { bytes, statistics })
    }

    /// Build the merged document without serializing it.
    ///
    /// Metadata is already applied; compression is not.
    ///
    /// # Errors
    ///
    /// Same as [`Merger::merge`], minus serialization.
    pub fn merge_documents(&self, entries: &[DocumentEntry]) -> Result<Document> {
        if entries.is_empty() {
            return Err(PdfJoinError::NoFilesToMerge);
        }

        let (mut merged, root) = self.page_tree.empty_document(BASE_VERSION);

        for (position, entry) in entries.iter().enumerate() {
            let doc = self.decode(entry, position)?;
            let pages = self.append(&mut merged, root, doc, entry, position)?;

            debug!(position, name = entry.name(), pages, "appended document");
        }

        self.metadata_manager
            .apply(&mut merged, &self.options.metadata);

        Ok(merged)
    }

    /// Decode every entry and report what each would contribute.
    ///
    /// # Errors
    ///
    /// Fails like [`Merger::merge`] on empty input or the first undecodable
    /// entry.
    pub fn inspect(&self, entries: &[DocumentEntry]) -> Result<Vec<EntrySummary>> {
        if entries.is_empty() {
            return Err(PdfJoinError::NoFilesToMerge);
        }

        entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                let doc = self.decode(entry, position)?;
                Ok(EntrySummary {
                    position,
                    name: entry.name().to_string(),
                    page_count: doc.get_pages().len(),
                    version: doc.version.clone(),
                    size: entry.size(),
                })
            })
            .collect()
    }

    /// Parse an entry's bytes as a PDF with a usable page tree.
    fn decode(&self, entry: &DocumentEntry, position: usize) -> Result<Document> {
        let fail = |reason: String| PdfJoinError::decode_failed(entry.name(), position, reason);

        let doc = Document::load_mem(entry.bytes()).map_err(|e| fail(e.to_string()))?;

        if doc.is_encrypted() {
            return Err(fail("document is encrypted".to_string()));
        }

        let root = self
            .page_tree
            .root_id(&doc)
            .map_err(|e| fail(format!("no page tree: {e}")))?;

        if !self.page_tree.is_pages_node(&doc, root) {
            return Err(fail("page tree root is not a Pages node".to_string()));
        }

        Ok(doc)
    }

    /// Move every object of `doc` into `merged` and attach its page tree.
    ///
    /// Returns the number of pages appended.
    fn append(
        &self,
        merged: &mut Document,
        root: lopdf::ObjectId,
        mut doc: Document,
        entry: &DocumentEntry,
        position: usize,
    ) -> Result<usize> {
        let fail = |reason: String| PdfJoinError::decode_failed(entry.name(), position, reason);

        // Avoid object id collisions by renumbering past the output's objects
        doc.renumber_objects_with(merged.max_id + 1);
        merged.max_id = doc.max_id;

        let subtree = self
            .page_tree
            .root_id(&doc)
            .map_err(|e| fail(format!("no page tree: {e}")))?;
        let page_count = doc.get_pages().len();

        // Only content travels; the source catalog and Info are dropped
        if let Ok(Object::Reference(catalog_id)) = doc.trailer.get(b"Root") {
            doc.objects.remove(catalog_id);
        }
        self.metadata_manager.clear(&mut doc);

        if doc.version > merged.version {
            merged.version = doc.version.clone();
        }

        merged.objects.extend(doc.objects);

        self.page_tree
            .attach(merged, root, subtree, page_count)
            .map_err(|e| PdfJoinError::serialize_failed(format!("page tree update failed: {e}")))?;

        Ok(page_count)
    }

    /// Apply compression and write the document to a byte buffer.
    fn serialize(&self, mut doc: Document) -> Result<Vec<u8>> {
        match self.options.compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => doc.compress(),
            CompressionLevel::Maximum => {
                doc.prune_objects();
                doc.compress();
            }
        }

        // Always renumber for consistency
        doc.renumber_objects();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(|e| {
            error!(error = %e, "failed to serialize merged document");
            PdfJoinError::serialize_failed(e.to_string())
        })?;

        Ok(bytes)
    }
}
