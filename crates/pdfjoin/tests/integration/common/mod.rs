//! Shared fixtures for the integration tests.
//!
//! PDFs are generated in memory instead of checked in. Every page carries its
//! label as the raw content stream, which makes the page order of a merged
//! document directly readable.

use lopdf::{Document, Object, Stream, dictionary};
use pdfjoin::DocumentEntry;
use std::path::{Path, PathBuf};

/// Build a PDF with one page per label.
pub fn pdf_bytes(labels: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = labels
        .iter()
        .map(|label| {
            let content_id = doc.add_object(Stream::new(dictionary! {}, label.as_bytes().to_vec()));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => labels.len() as i64,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("source title"),
    });
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to build fixture PDF");
    bytes
}

/// An in-memory entry with one page per label.
pub fn pdf_entry(name: &str, labels: &[&str]) -> DocumentEntry {
    DocumentEntry::new(name, pdf_bytes(labels))
}

/// An entry whose bytes are not a PDF.
pub fn corrupt_entry(name: &str) -> DocumentEntry {
    DocumentEntry::new(name, b"this is not a pdf document".to_vec())
}

/// Write a fixture PDF to `dir/name` and return its path.
pub fn write_pdf(dir: &Path, name: &str, labels: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_bytes(labels)).expect("Failed to write fixture PDF");
    path
}

/// Page labels of a merged document, in page order.
pub fn page_labels(bytes: &[u8]) -> Vec<String> {
    pdfjoin::merge::page_contents(bytes)
        .expect("Merged output should decode")
        .into_iter()
        .map(|content| String::from_utf8_lossy(&content).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_round_trips_labels() {
        let doc = Document::load_mem(&pdf_bytes(&["one", "two"])).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
