//! Output metadata policy.
//!
//! The merged document never inherits the Info dictionaries of its sources.
//! After all content is appended, a fresh Info dictionary is written with a
//! generator string (`Producer`) and a title. Nothing else is guaranteed.

use lopdf::{Dictionary, Document, Object, StringFormat};

/// Title written when none is configured.
pub const DEFAULT_TITLE: &str = "Merged Document";

/// Metadata written to every merged document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputMetadata {
    /// Generator identifier stored as `/Producer`.
    pub producer: String,
    /// Document title stored as `/Title`.
    pub title: String,
}

impl Default for OutputMetadata {
    fn default() -> Self {
        Self {
            producer: default_producer(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Metadata read back from a document's Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    /// `/Title`, if present.
    pub title: Option<String>,
    /// `/Producer`, if present.
    pub producer: Option<String>,
    /// `/Author`, if present.
    pub author: Option<String>,
}

/// Reads and rewrites document-level metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataManager;

impl MetadataManager {
    /// Create a new metadata manager.
    pub fn new() -> Self {
        Self
    }

    /// Replace the document's Info dictionary with one holding `metadata`.
    ///
    /// Any previous Info dictionary, and every field in it, is discarded.
    pub fn apply(&self, doc: &mut Document, metadata: &OutputMetadata) {
        self.clear(doc);

        let mut info = Dictionary::new();
        info.set("Producer", text_string(&metadata.producer));
        info.set("Title", text_string(&metadata.title));

        let info_id = doc.add_object(Object::Dictionary(info));
        doc.trailer.set("Info", Object::Reference(info_id));
    }

    /// Read the document's Info dictionary.
    pub fn read(&self, doc: &Document) -> DocumentInfo {
        let Some(info) = info_dictionary(doc) else {
            return DocumentInfo::default();
        };

        DocumentInfo {
            title: string_field(info, b"Title"),
            producer: string_field(info, b"Producer"),
            author: string_field(info, b"Author"),
        }
    }

    /// Remove the Info dictionary, if any.
    pub fn clear(&self, doc: &mut Document) {
        if let Some(Object::Reference(info_id)) = doc.trailer.remove(b"Info") {
            doc.objects.remove(&info_id);
        }
    }

    /// Check if a document has an Info dictionary.
    pub fn has_metadata(&self, doc: &Document) -> bool {
        doc.trailer.has(b"Info")
    }
}

fn default_producer() -> String {
    format!("{} {} (lopdf)", crate::NAME, crate::VERSION)
}

fn info_dictionary(doc: &Document) -> Option<&Dictionary> {
    match doc.trailer.get(b"Info").ok()? {
        Object::Reference(id) => doc.get_object(*id).and_then(Object::as_dict).ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

fn string_field(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

/// Encode `text` as a PDF text string.
///
/// ASCII goes out as a literal string. Anything else is written as UTF-16BE
/// with a byte order mark, which every reader understands.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        // PDFDocEncoding agrees with Latin-1 for printable characters.
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
