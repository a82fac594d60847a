//! Failure paths: every error names what went wrong and leaves state intact.

use crate::common::{corrupt_entry, pdf_entry, write_pdf};
use pdfjoin::config::{Config, OverwriteMode};
use pdfjoin::io::ArtifactWriter;
use pdfjoin::{Merger, PdfJoinError, Session};
use std::path::PathBuf;
use tempfile::TempDir;

#[tokio::test]
async fn test_merge_with_no_documents() {
    let session = Session::new();

    let err = session.merge().await.unwrap_err();

    assert!(matches!(err, PdfJoinError::NoFilesToMerge));
    assert!(err.is_user_correctable());
}

#[tokio::test]
async fn test_undecodable_entry_is_identified() {
    let session = Session::new();
    session.add_entry(pdf_entry("good.pdf", &["g"]));
    session.add_entry(corrupt_entry("bad.pdf"));
    let before = session.snapshot();

    let err = session.merge().await.unwrap_err();

    match &err {
        PdfJoinError::DecodeFailed { name, position, .. } => {
            assert_eq!(name, "bad.pdf");
            assert_eq!(*position, 1);
        }
        other => panic!("expected DecodeFailed, got {other:?}"),
    }
    assert!(err.to_string().contains("bad.pdf"));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_first_bad_entry_wins() {
    let entries = vec![
        corrupt_entry("first.pdf"),
        pdf_entry("ok.pdf", &["ok"]),
        corrupt_entry("second.pdf"),
    ];

    let err = Merger::new().merge(&entries).unwrap_err();

    assert_eq!(err.offending_entry(), Some(("first.pdf", 0)));
}

#[test]
fn test_edits_out_of_range_leave_session_unchanged() {
    let session = Session::new();
    session.add_entry(pdf_entry("a", &["a"]));
    session.add_entry(pdf_entry("b", &["b"]));

    assert!(matches!(
        session.remove_at(2),
        Err(PdfJoinError::IndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(matches!(
        session.move_to(0, 5),
        Err(PdfJoinError::IndexOutOfRange { index: 5, len: 2 })
    ));
    assert_eq!(session.len(), 2);
}

#[tokio::test]
async fn test_missing_input_file() {
    let config = Config::new(
        vec![PathBuf::from("/nonexistent/file.pdf")],
        PathBuf::from("out.pdf"),
    );

    let result = Session::from_config(&config).await;

    assert!(matches!(result, Err(PdfJoinError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_missing_input_skipped_with_continue_on_error() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_pdf(temp_dir.path(), "good.pdf", &["g"]);
    let mut config = Config::new(
        vec![temp_dir.path().join("missing.pdf"), good],
        temp_dir.path().join("out.pdf"),
    );
    config.continue_on_error = true;

    let (session, report) = Session::from_config(&config).await.unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.statistics.failure_count, 1);
    assert_eq!(session.len(), 1);
}

#[tokio::test]
async fn test_directory_input_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::new(
        vec![temp_dir.path().to_path_buf()],
        temp_dir.path().join("out.pdf"),
    );

    let result = Session::from_config(&config).await;

    assert!(matches!(result, Err(PdfJoinError::NotAFile { .. })));
}

#[tokio::test]
async fn test_bad_edit_in_config() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::new(
        vec![write_pdf(temp_dir.path(), "a.pdf", &["a"])],
        temp_dir.path().join("out.pdf"),
    );
    config.removals = vec![3];

    let result = Session::from_config(&config).await;

    assert!(matches!(
        result,
        Err(PdfJoinError::IndexOutOfRange { index: 3, len: 1 })
    ));
}

#[tokio::test]
async fn test_existing_output_is_not_clobbered() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out.pdf");
    std::fs::write(&output_path, b"keep me").unwrap();

    let output = Merger::new().merge(&[pdf_entry("a", &["a"])]).unwrap();
    let result = ArtifactWriter::new(OverwriteMode::NoClobber)
        .write(output.bytes, &output_path)
        .await;

    assert!(matches!(result, Err(PdfJoinError::OutputExists { .. })));
    assert_eq!(std::fs::read(&output_path).unwrap(), b"keep me");
}
