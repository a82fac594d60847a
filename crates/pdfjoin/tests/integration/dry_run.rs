//! Inspecting a collection without producing output.

use crate::common::{corrupt_entry, pdf_entry};
use pdfjoin::{PdfJoinError, Session};

#[tokio::test]
async fn test_inspect_reports_each_entry() {
    let session = Session::new();
    session.add_entry(pdf_entry("cover.pdf", &["c"]));
    session.add_entry(pdf_entry("body.pdf", &["1", "2", "3"]));

    let summaries = session.inspect().await.unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "cover.pdf");
    assert_eq!(summaries[0].page_count, 1);
    assert_eq!(summaries[1].position, 1);
    assert_eq!(summaries[1].page_count, 3);
    assert_eq!(summaries[1].version, "1.4");
}

#[tokio::test]
async fn test_inspect_fails_like_merge() {
    let session = Session::new();
    session.add_entry(corrupt_entry("broken.pdf"));

    let err = session.inspect().await.unwrap_err();

    assert_eq!(err.offending_entry(), Some(("broken.pdf", 0)));
}

#[tokio::test]
async fn test_inspect_empty() {
    let result = Session::new().inspect().await;
    assert!(matches!(result, Err(PdfJoinError::NoFilesToMerge)));
}
