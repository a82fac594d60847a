//! Ordered document collection.
//!
//! [`DocumentCollection`] holds the documents a user has supplied, in the order
//! they will be merged. It is the single source of truth for membership and
//! order. Entries are addressed by position only: names may repeat.
//!
//! Every mutating operation is atomic. It either completes fully or returns an
//! error and leaves the collection untouched.
//!
//! # Examples
//!
//! ```
//! use pdfjoin::collection::{DocumentCollection, DocumentEntry};
//!
//! let mut collection = DocumentCollection::new();
//! collection.add(DocumentEntry::new("a.pdf", b"...".to_vec()));
//! collection.add(DocumentEntry::new("b.pdf", b"...".to_vec()));
//! collection.add(DocumentEntry::new("c.pdf", b"...".to_vec()));
//!
//! collection.move_to(0, 2).unwrap();
//! let names: Vec<_> = collection.iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["b.pdf", "c.pdf", "a.pdf"]);
//! ```

use serde::Serialize;
use std::sync::Arc;

use crate::error::{PdfJoinError, Result};

/// One user-supplied document: a display name and its raw bytes.
///
/// The byte buffer is immutable and shared, so cloning an entry (for example
/// when taking a snapshot) never copies document data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    name: String,
    bytes: Arc<[u8]>,
}

impl DocumentEntry {
    /// Create an entry from a name and the document's bytes.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name of the entry, usually the source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw document bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the document in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// A `(position, name)` row describing the collection for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    /// Zero-based position in merge order.
    pub position: usize,
    /// Entry name.
    pub name: String,
    /// Document size in bytes.
    pub size: u64,
}

/// Ordered, mutable list of documents defining merge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCollection {
    entries: Vec<DocumentEntry>,
}

impl DocumentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the collection.
    ///
    /// The bytes are not inspected here; decoding happens at merge time.
    pub fn add(&mut self, entry: DocumentEntry) {
        self.entries.push(entry);
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::IndexOutOfRange`] if `index >= len`. The
    /// collection is not modified in that case.
    pub fn remove_at(&mut self, index: usize) -> Result<DocumentEntry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    /// Move the entry at `from` so that it ends up at position `to`.
    ///
    /// The entry is taken out first and then inserted at `to`, counted against
    /// the shortened sequence. `move_to(0, 2)` on `[A, B, C, D]` gives
    /// `[B, C, A, D]`, not the swap `[C, B, A, D]`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::IndexOutOfRange`] if either position is
    /// `>= len`. Both are checked before anything moves.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from != to {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
        }

        Ok(())
    }

    /// Copy of the current order, decoupled from later mutations.
    pub fn snapshot(&self) -> Vec<DocumentEntry> {
        self.entries.clone()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    /// Iterate over entries in merge order.
    pub fn iter(&self) -> impl Iterator<Item = &DocumentEntry> {
        self.entries.iter()
    }

    /// Current `(position, name)` rows for the presentation layer.
    pub fn listing(&self) -> Vec<ListingEntry> {
        self.entries
            .iter()
            .enumerate()
            .map(|(position, entry)| ListingEntry {
                position,
                name: entry.name.clone(),
                size: entry.size(),
            })
            .collect()
    }

    /// Combined size of all entries in bytes.
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(DocumentEntry::size).sum()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(PdfJoinError::index_out_of_range(index, self.entries.len()));
        }
        Ok(())
    }
}

impl Extend<DocumentEntry> for DocumentCollection {
    fn extend<I: IntoIterator<Item = DocumentEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<DocumentEntry> for DocumentCollection {
    fn from_iter<I: IntoIterator<Item = DocumentEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
