//! A user session: one collection plus the commands that act on it.
//!
//! [`Session`] is the boundary front ends talk to. Each user action is a plain
//! method: add, remove, move, clear, list, inspect, merge. The collection sits
//! behind a mutex so a snapshot never observes a half-applied mutation, and a
//! merge always works on the order as it was at the instant it started.
//!
//! At most one merge runs per session. A second request while one is in
//! flight is rejected with [`PdfJoinError::MergeInProgress`]; the in-flight
//! flag is cleared when the merge worker finishes, whether it succeeded or
//! not, and even if the caller stopped waiting for it.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task;
use tracing::{debug, warn};

use crate::collection::{DocumentCollection, DocumentEntry, ListingEntry};
use crate::config::{Config, MoveOp};
use crate::error::{PdfJoinError, Result};
use crate::io::{IngestStatistics, SourceReader};
use crate::merge::{EntrySummary, MergeOutput, Merger};

/// Outcome of adding a batch of sources.
#[derive(Debug, Default)]
pub struct AddReport {
    /// Number of entries appended to the collection.
    pub added: usize,
    /// Sources that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, PdfJoinError)>,
    /// Read statistics for the batch.
    pub statistics: IngestStatistics,
}

/// Owned, resettable session state.
#[derive(Debug, Default)]
pub struct Session {
    collection: Mutex<DocumentCollection>,
    merging: Arc<AtomicBool>,
    merger: Merger,
    reader: SourceReader,
}

/// Marks a merge as in flight until dropped.
#[derive(Debug)]
pub(crate) struct MergeGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for MergeGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Session {
    /// Create an empty session with a default merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session that merges with `merger`.
    pub fn with_merger(merger: Merger) -> Self {
        Self {
            merger,
            ..Self::default()
        }
    }

    /// Build a session from a merge run's configuration.
    ///
    /// The inputs are read in order with [`Config::effective_jobs`] reads in
    /// flight, then the configured removals and moves are applied.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, an unreadable input (unless
    /// `continue_on_error` is set), or an edit that names a missing position.
    pub async fn from_config(config: &Config) -> Result<(Self, AddReport)> {
        config.validate()?;

        let session = Self::with_merger(Merger::with_options(config.merge_options()));
        let report = session
            .add_sources(
                &config.inputs,
                config.effective_jobs(),
                config.continue_on_error,
            )
            .await?;
        session.apply_edits(&config.removals, &config.moves)?;

        Ok((session, report))
    }

    /// Append an entry whose bytes are already in memory.
    pub fn add_entry(&self, entry: DocumentEntry) {
        self.lock().add(entry);
    }

    /// Read `paths` and append them in the order given.
    ///
    /// Reads may run concurrently (up to `workers` at a time) but entries are
    /// appended in `paths` order, as one atomic step once every read has
    /// finished.
    ///
    /// # Errors
    ///
    /// Without `continue_on_error`, the first failed read (in `paths` order)
    /// is returned and nothing is added. With it, unreadable sources are
    /// skipped and listed in the report.
    pub async fn add_sources(
        &self,
        paths: &[PathBuf],
        workers: usize,
        continue_on_error: bool,
    ) -> Result<AddReport> {
        let (results, statistics) = self.reader.read_all(paths, workers).await;

        let mut entries = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(entry) => entries.push(entry),
                Err(err) if continue_on_error => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable source");
                    skipped.push((path.clone(), err));
                }
                Err(err) => return Err(err),
            }
        }

        let added = entries.len();
        self.lock().extend(entries);
        debug!(added, skipped = skipped.len(), "sources added");

        Ok(AddReport {
            added,
            skipped,
            statistics,
        })
    }

    /// Remove the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::IndexOutOfRange`]; the collection is unchanged.
    pub fn remove_at(&self, index: usize) -> Result<DocumentEntry> {
        self.lock().remove_at(index)
    }

    /// Move the entry at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::IndexOutOfRange`]; the collection is unchanged.
    pub fn move_to(&self, from: usize, to: usize) -> Result<()> {
        self.lock().move_to(from, to)
    }

    /// Apply removals, then moves, as one step.
    ///
    /// Removals run first in the order given, each against the collection
    /// as left by the previous one; moves follow the same way.
    ///
    /// # Errors
    ///
    /// Returns the first [`PdfJoinError::IndexOutOfRange`]. Nothing is applied
    /// in that case.
    pub fn apply_edits(&self, removals: &[usize], moves: &[MoveOp]) -> Result<()> {
        let mut collection = self.lock();
        let mut edited = collection.clone();

        for &index in removals {
            edited.remove_at(index)?;
        }
        for op in moves {
            edited.move_to(op.from, op.to)?;
        }

        *collection = edited;
        Ok(())
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the session has no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Current `(position, name)` rows.
    pub fn listing(&self) -> Vec<ListingEntry> {
        self.lock().listing()
    }

    /// Copy of the current order.
    pub fn snapshot(&self) -> Vec<DocumentEntry> {
        self.lock().snapshot()
    }

    /// Whether a merge is currently running.
    pub fn is_merging(&self) -> bool {
        self.merging.load(Ordering::Acquire)
    }

    /// Decode every entry of the current snapshot without producing output.
    ///
    /// # Errors
    ///
    /// Same as [`Merger::inspect`].
    pub async fn inspect(&self) -> Result<Vec<EntrySummary>> {
        let snapshot = self.snapshot();
        let merger = self.merger.clone();

        task::spawn_blocking(move || merger.inspect(&snapshot))
            .await
            .map_err(|e| PdfJoinError::other(format!("Inspect task failed: {e}")))?
    }

    /// Snapshot the current order and merge it.
    ///
    /// The merge itself runs on a blocking worker thread and cannot be
    /// interrupted once started. The collection is never modified by a
    /// merge, successful or not.
    ///
    /// # Errors
    ///
    /// Returns [`PdfJoinError::MergeInProgress`] if another merge on this
    /// session has not finished, otherwise the errors of [`Merger::merge`].
    pub async fn merge(&self) -> Result<MergeOutput> {
        let guard = self.begin_merge()?;

        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return Err(PdfJoinError::NoFilesToMerge);
        }

        let merger = self.merger.clone();
        run_guarded(guard, move || merger.merge(&snapshot)).await
    }

    /// Claim the single merge slot.
    pub(crate) fn begin_merge(&self) -> Result<MergeGuard> {
        self.merging
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PdfJoinError::MergeInProgress)?;

        Ok(MergeGuard {
            flag: Arc::clone(&self.merging),
        })
    }

    fn lock(&self) -> MutexGuard<'_, DocumentCollection> {
        // Collection operations are atomic, so a poisoned lock still guards
        // a consistent collection.
        self.collection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run `work` on a blocking worker that owns `guard`.
///
/// The slot is released when the worker returns, not when the returned
/// future is dropped: a blocking task keeps running after its caller goes
/// away.
async fn run_guarded<T, F>(guard: MergeGuard, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(move || {
        let _guard = guard;
        work()
    })
    .await
    .map_err(|e| PdfJoinError::serialize_failed(format!("Merge task failed: {e}")))?
}
