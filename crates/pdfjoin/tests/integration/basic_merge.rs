//! End-to-end merges through the public API.

use crate::common::{page_labels, pdf_entry, write_pdf};
use pdfjoin::config::{CompressionLevel, Config, OverwriteMode};
use pdfjoin::io::ArtifactWriter;
use pdfjoin::merge::{MergeOptions, MetadataManager, OutputMetadata};
use pdfjoin::{Merger, Session};
use rstest::rstest;
use tempfile::TempDir;

#[tokio::test]
async fn test_reordered_session_merges_in_listing_order() {
    let session = Session::new();
    session.add_entry(pdf_entry("x.doc", &["x"]));
    session.add_entry(pdf_entry("y.doc", &["y"]));
    session.add_entry(pdf_entry("z.doc", &["z"]));

    session.move_to(2, 0).unwrap();

    let names: Vec<String> = session.listing().into_iter().map(|e| e.name).collect();
    assert_eq!(names, ["z.doc", "x.doc", "y.doc"]);

    let output = session.merge().await.unwrap();
    assert_eq!(page_labels(&output.bytes), ["z", "x", "y"]);
    assert_eq!(output.statistics.files_merged, 3);
    assert_eq!(output.statistics.total_pages, 3);
}

#[test]
fn test_multi_page_sections_stay_contiguous() {
    let entries = vec![
        pdf_entry("b.pdf", &["b1", "b2"]),
        pdf_entry("a.pdf", &["a1", "a2", "a3"]),
    ];

    let output = Merger::new().merge(&entries).unwrap();

    assert_eq!(page_labels(&output.bytes), ["b1", "b2", "a1", "a2", "a3"]);
}

#[test]
fn test_merging_twice_gives_same_pages() {
    let entries = vec![pdf_entry("a", &["a"]), pdf_entry("b", &["b1", "b2"])];
    let merger = Merger::new();

    let first = merger.merge(&entries).unwrap();
    let second = merger.merge(&entries).unwrap();

    assert_eq!(page_labels(&first.bytes), page_labels(&second.bytes));
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
fn test_every_compression_level_keeps_pages(#[case] compression: CompressionLevel) {
    let merger = Merger::with_options(MergeOptions {
        compression,
        ..MergeOptions::default()
    });

    let output = merger
        .merge(&[pdf_entry("a", &["one", "two"]), pdf_entry("b", &["three"])])
        .unwrap();

    assert_eq!(page_labels(&output.bytes), ["one", "two", "three"]);
}

#[test]
fn test_output_metadata_replaces_source_info() {
    let merger = Merger::with_options(MergeOptions {
        metadata: OutputMetadata {
            title: "Quarterly Report".to_string(),
            ..OutputMetadata::default()
        },
        ..MergeOptions::default()
    });

    let output = merger.merge(&[pdf_entry("a", &["a"])]).unwrap();
    let doc = lopdf::Document::load_mem(&output.bytes).unwrap();
    let info = MetadataManager::new().read(&doc);

    assert_eq!(info.title.as_deref(), Some("Quarterly Report"));
    assert!(info.producer.unwrap().starts_with("pdfjoin "));
}

#[tokio::test]
async fn test_files_to_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let first = write_pdf(temp_dir.path(), "first.pdf", &["1"]);
    let second = write_pdf(temp_dir.path(), "second.pdf", &["2a", "2b"]);
    let output_path = temp_dir.path().join("out").join("joined.pdf");

    let mut config = Config::new(vec![second, first], output_path.clone());
    config.title = Some("Joined".to_string());

    let (session, report) = Session::from_config(&config).await.unwrap();
    assert_eq!(report.added, 2);

    let output = session.merge().await.unwrap();
    let stats = ArtifactWriter::new(OverwriteMode::NoClobber)
        .write(output.bytes, &output_path)
        .await
        .unwrap();

    assert_eq!(stats.output_path, output_path);
    let written = std::fs::read(&output_path).unwrap();
    assert_eq!(written.len() as u64, stats.file_size);
    assert_eq!(page_labels(&written), ["2a", "2b", "1"]);
}

#[tokio::test]
async fn test_config_edits_apply_before_merge() {
    let temp_dir = TempDir::new().unwrap();
    let inputs = vec![
        write_pdf(temp_dir.path(), "a.pdf", &["a"]),
        write_pdf(temp_dir.path(), "b.pdf", &["b"]),
        write_pdf(temp_dir.path(), "c.pdf", &["c"]),
    ];

    let mut config = Config::new(inputs, temp_dir.path().join("out.pdf"));
    config.removals = vec![0];
    config.moves = vec!["2:1".parse().unwrap()];

    let (session, _) = Session::from_config(&config).await.unwrap();
    let output = session.merge().await.unwrap();

    assert_eq!(page_labels(&output.bytes), ["c", "b"]);
}
