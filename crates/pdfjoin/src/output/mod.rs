//! User-facing output for pdfjoin front ends.
//!
//! Diagnostics for developers go through `tracing`; this module is for the
//! messages a user reads: listings, summaries, and results.
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::output::{OutputFormatter, display_listing};
//! use pdfjoin::Session;
//!
//! let session = Session::new();
//! let formatter = OutputFormatter::default();
//! display_listing(&formatter, &session.listing());
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::collection::ListingEntry;
use crate::io::{IngestStatistics, WriteStatistics};
use crate::merge::{EntrySummary, MergeStatistics};
use crate::utils::format_file_size;

/// Show the collection in presentation order, 1-based.
pub fn display_listing(formatter: &OutputFormatter, listing: &[ListingEntry]) {
    if listing.is_empty() {
        formatter.info("No documents.");
        return;
    }

    for entry in listing {
        formatter.list_item(entry.position + 1, &listing_line(entry));
    }
}

fn listing_line(entry: &ListingEntry) -> String {
    format!("{} ({})", entry.name, format_file_size(entry.size))
}

/// Show ingestion statistics.
pub fn display_ingest_statistics(formatter: &OutputFormatter, stats: &IngestStatistics) {
    if stats.failure_count > 0 {
        formatter.warning(&format!(
            "{} source(s) could not be read",
            stats.failure_count
        ));
    }

    formatter.info(&format!(
        "Read {} file(s) in {:.2}s ({})",
        stats.success_count,
        stats.total_time.as_secs_f64(),
        stats.format_total_size()
    ));
}

/// Show the per-entry result of a dry run.
pub fn display_summaries(formatter: &OutputFormatter, summaries: &[EntrySummary]) {
    for summary in summaries {
        formatter.list_item(
            summary.position + 1,
            &format!(
                "{}: {} page(s), PDF {}, {}",
                summary.name,
                summary.page_count,
                summary.version,
                format_file_size(summary.size)
            ),
        );
    }

    let pages: usize = summaries.iter().map(|s| s.page_count).sum();
    formatter.info(&format!(
        "{} document(s), {pages} page(s) would be merged",
        summaries.len()
    ));
}

/// Show the outcome of a merge and, in verbose mode, its statistics.
pub fn display_merge_result(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    write: Option<&WriteStatistics>,
) {
    match write {
        Some(write) => formatter.success(&format!(
            "Merged {} document(s), {} page(s) into {} ({})",
            stats.files_merged,
            stats.total_pages,
            write.output_path.display(),
            write.format_file_size()
        )),
        None => formatter.success(&format!(
            "Merged {} document(s), {} page(s)",
            stats.files_merged, stats.total_pages
        )),
    }

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Output size", &stats.format_output_size());
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", stats.merge_time.as_secs_f64()),
        );
        if let Some(write) = write {
            formatter.detail(
                "Write time",
                &format!("{:.2}s", write.write_time.as_secs_f64()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_line() {
        let entry = ListingEntry {
            position: 0,
            name: "a.pdf".to_string(),
            size: 2048,
        };

        assert_eq!(listing_line(&entry), format!("a.pdf ({})", format_file_size(2048)));
    }

    #[test]
    fn test_display_empty_listing() {
        display_listing(&OutputFormatter::quiet(), &[]);
    }

    #[test]
    fn test_display_summaries() {
        let summaries = vec![EntrySummary {
            position: 0,
            name: "a.pdf".to_string(),
            page_count: 3,
            version: "1.4".to_string(),
            size: 100,
        }];

        display_summaries(&OutputFormatter::quiet(), &summaries);
    }
}
