//! Source ingestion.
//!
//! Reading a source file is the only place the crate waits on I/O. A batch of
//! sources may be read concurrently, but the results always come back in the
//! order the paths were given, so entries are added to the collection in
//! presentation order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::io::reader::SourceReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = SourceReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let (results, stats) = reader.read_all(&paths, 4).await;
//! println!("read {} of {} files", stats.success_count, paths.len());
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::collection::DocumentEntry;
use crate::error::{PdfJoinError, Result};
use crate::utils::format_file_size;

/// Result of reading one source.
pub type ReadResult = Result<DocumentEntry>;

/// Statistics for a batch read.
#[derive(Debug, Clone, Default)]
pub struct IngestStatistics {
    /// Number of sources read successfully.
    pub success_count: usize,

    /// Number of sources that failed.
    pub failure_count: usize,

    /// Wall time for the whole batch.
    pub total_time: Duration,

    /// Total size of the sources read.
    pub total_size: u64,
}

impl IngestStatistics {
    fn from_results(results: &[ReadResult], total_time: Duration) -> Self {
        let mut stats = Self {
            total_time,
            ..Self::default()
        };

        for result in results {
            match result {
                Ok(entry) => {
                    stats.success_count += 1;
                    stats.total_size += entry.size();
                }
                Err(_) => stats.failure_count += 1,
            }
        }

        stats
    }

    /// Format total size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Reads source files into [`DocumentEntry`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceReader;

impl SourceReader {
    /// Create a new source reader.
    pub fn new() -> Self {
        Self
    }

    /// Read one source file.
    ///
    /// The entry is named after the file name component of `path`. The bytes
    /// are not checked for being a PDF; that happens at merge time.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist, is a directory, or cannot
    /// be read.
    pub async fn read(&self, path: &Path) -> ReadResult {
        let metadata = tokio::fs::metadata(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PdfJoinError::file_not_found(path.to_path_buf())
            } else {
                PdfJoinError::FailedToReadSource {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfJoinError::not_a_file(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PdfJoinError::FailedToReadSource {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(DocumentEntry::new(entry_name(path), bytes))
    }

    /// Read several sources with at most `workers` reads in flight.
    ///
    /// Results are returned in the same order as `paths`, regardless of the
    /// order in which reads complete.
    pub async fn read_all(
        &self,
        paths: &[PathBuf],
        workers: usize,
    ) -> (Vec<ReadResult>, IngestStatistics) {
        let start = Instant::now();
        let workers = workers.max(1);

        let results: Vec<ReadResult> = stream::iter(paths)
            .map(|path| self.read(path))
            .buffered(workers)
            .collect()
            .await;

        let stats = IngestStatistics::from_results(&results, start.elapsed());
        (results, stats)
    }
}

/// Display name for a source path: its file name, or the whole path if it
/// has none.
fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
