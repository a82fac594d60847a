//! Writing the merged artifact.
//!
//! This module provides safe output writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Overwrite protection
//! - Write statistics

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::OverwriteMode;
use crate::error::{PdfJoinError, Result};
use crate::utils::format_file_size;

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Writes merged bytes to disk.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    overwrite_mode: OverwriteMode,
    atomic: bool,
}

impl ArtifactWriter {
    /// Create a writer that refuses to replace existing files.
    ///
    /// [`OverwriteMode::Prompt`] is treated like [`OverwriteMode::NoClobber`]:
    /// asking the user is the front end's job, which then passes
    /// [`OverwriteMode::Force`] once confirmed.
    pub fn new(overwrite_mode: OverwriteMode) -> Self {
        Self {
            overwrite_mode,
            atomic: true,
        }
    }

    /// Create a writer without atomic writes (faster but less safe).
    pub fn non_atomic(overwrite_mode: OverwriteMode) -> Self {
        Self {
            overwrite_mode,
            atomic: false,
        }
    }

    /// Write `bytes` to `path` and report what was written.
    ///
    /// Parent directories are created as needed. With atomic writes the data
    /// goes to a sibling temp file first and is renamed into place, so a
    /// failed write never leaves a truncated output behind.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output exists and overwriting is not allowed
    /// - The file cannot be created, written or renamed
    pub async fn write(&self, bytes: Vec<u8>, path: &Path) -> Result<WriteStatistics> {
        if self.overwrite_mode != OverwriteMode::Force && self.exists(path).await {
            return Err(PdfJoinError::output_exists(path.to_path_buf()));
        }

        let path_buf = path.to_path_buf();
        let atomic = self.atomic;

        task::spawn_blocking(move || write_blocking(&bytes, path_buf, atomic))
            .await
            .map_err(|e| PdfJoinError::other(format!("Write task failed: {e}")))?
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}

fn write_blocking(bytes: &[u8], path_buf: PathBuf, atomic: bool) -> Result<WriteStatistics> {
    let start = Instant::now();
    let fail = |path: &Path, source: std::io::Error| PdfJoinError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path_buf.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| fail(parent, e))?;
    }

    let write_path = if atomic {
        temp_path_for(&path_buf)
    } else {
        path_buf.clone()
    };

    let file = std::fs::File::create(&write_path).map_err(|e| fail(&write_path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    writer.write_all(bytes).map_err(|e| fail(&write_path, e))?;
    writer.flush().map_err(|e| fail(&write_path, e))?;
    drop(writer);

    if atomic && let Err(e) = std::fs::rename(&write_path, &path_buf) {
        std::fs::remove_file(&write_path).ok();
        return Err(fail(&path_buf, e));
    }

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size: bytes.len() as u64,
        output_path: path_buf,
    })
}

/// `out.pdf` -> `.out.pdf.tmp` in the same directory, so the rename stays on
/// one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{file_name}.tmp"))
}
