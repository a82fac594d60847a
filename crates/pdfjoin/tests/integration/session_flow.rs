//! A session driven the way an interactive user would drive it.

use crate::common::{page_labels, pdf_entry, write_pdf};
use pdfjoin::{PdfJoinError, Session};
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_edit_merge_edit_merge() {
    let temp_dir = TempDir::new().unwrap();
    let paths = vec![
        write_pdf(temp_dir.path(), "1.pdf", &["one"]),
        write_pdf(temp_dir.path(), "2.pdf", &["two"]),
    ];
    let session = Session::new();

    session.add_sources(&paths, 2, false).await.unwrap();
    let first = session.merge().await.unwrap();
    assert_eq!(page_labels(&first.bytes), ["one", "two"]);

    session.remove_at(0).unwrap();
    session.add_entry(pdf_entry("3.pdf", &["three"]));
    let second = session.merge().await.unwrap();
    assert_eq!(page_labels(&second.bytes), ["two", "three"]);

    session.clear();
    assert!(matches!(
        session.merge().await,
        Err(PdfJoinError::NoFilesToMerge)
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_merges_never_overlap() {
    let session = Arc::new(Session::new());
    for i in 0..20 {
        let label = format!("p{i}");
        session.add_entry(pdf_entry(&format!("{i}.pdf"), &[label.as_str()]));
    }

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.merge().await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(output) => {
                succeeded += 1;
                assert_eq!(output.statistics.total_pages, 20);
            }
            Err(PdfJoinError::MergeInProgress) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert!(succeeded >= 1);
    assert!(!session.is_merging());
}
