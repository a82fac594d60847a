//! Page tree handling for the accumulating output document.
//!
//! Each source document contributes its whole page tree as one subtree under
//! the output root. Keeping the source's root `Pages` node (instead of
//! flattening its kids) keeps attributes the pages inherit from it, such as
//! `MediaBox` and `Resources`.

use lopdf::{Document, Object, ObjectId, dictionary};

/// Page tree operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTree;

impl PageTree {
    /// Create a new page tree helper.
    pub fn new() -> Self {
        Self
    }

    /// Build an empty output document: a catalog pointing at a page tree
    /// root with no kids.
    ///
    /// Returns the document and the id of its page tree root.
    pub fn empty_document(&self, version: &str) -> (Document, ObjectId) {
        let mut doc = Document::with_version(version);

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        (doc, pages_id)
    }

    /// Id of the document's page tree root.
    ///
    /// # Errors
    ///
    /// Fails if the catalog is missing or has no `/Pages` reference.
    pub fn root_id(&self, doc: &Document) -> lopdf::Result<ObjectId> {
        doc.catalog()?.get(b"Pages")?.as_reference()
    }

    /// Check that `id` names a `Pages` node (as opposed to a single page or
    /// something else entirely).
    pub fn is_pages_node(&self, doc: &Document, id: ObjectId) -> bool {
        doc.get_object(id)
            .and_then(Object::as_dict)
            .is_ok_and(|node| node.has_type(b"Pages"))
    }

    /// Hang `subtree` under `root` as its last kid and add `page_count` to
    /// the root's page count.
    ///
    /// The subtree's own `/Count` is set to `page_count` and its `/Parent` is
    /// pointed at `root`.
    pub fn attach(
        &self,
        doc: &mut Document,
        root: ObjectId,
        subtree: ObjectId,
        page_count: usize,
    ) -> lopdf::Result<()> {
        let count = page_count as i64;

        let subtree_dict = doc.get_object_mut(subtree)?.as_dict_mut()?;
        subtree_dict.set("Parent", Object::Reference(root));
        subtree_dict.set("Count", Object::Integer(count));

        let root_dict = doc.get_object_mut(root)?.as_dict_mut()?;
        root_dict
            .get_mut(b"Kids")?
            .as_array_mut()?
            .push(Object::Reference(subtree));

        let current = root_dict.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        root_dict.set("Count", Object::Integer(current + count));

        Ok(())
    }

    /// Decoded content of every page, in page order.
    ///
    /// This is the section sequence of a document: two documents with equal
    /// page contents in equal order carry the same content, whatever their
    /// object numbering or metadata.
    pub fn page_contents(&self, doc: &Document) -> Vec<Vec<u8>> {
        doc.get_pages()
            .into_values()
            .map(|page_id| doc.get_page_content(page_id).unwrap_or_default())
            .collect()
    }
}
