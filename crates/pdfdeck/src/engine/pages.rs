//! Page tree construction for output documents.
//!
//! An output document is built from scratch: a fresh `Pages` node is created
//! up front and every copied page is re-parented onto it. Attributes a page
//! inherits from its ancestors in the source tree are written onto the copy,
//! since the copy no longer has those ancestors.
//!
//! Only objects reachable from a selected page are copied. References back
//! into the source page tree (an annotation's `/P`, a link destination) are
//! never followed: a reference to the page being copied is pointed at its
//! copy, and a reference to any other source page or `Pages` node becomes
//! `null`.

use std::collections::BTreeSet;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use tracing::trace;

use crate::error::{PdfDeckError, Result};
use crate::utils::{copy_references, rewrite_references};

use super::AssemblyOptions;

/// Page attributes that may be inherited from a parent `Pages` node.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against `Parent` cycles in malformed files.
const MAX_TREE_DEPTH: usize = 64;

/// Incrementally assembles an output document out of source pages.
pub(crate) struct PageTreeBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
}

impl PageTreeBuilder {
    pub(crate) fn new(options: &AssemblyOptions) -> Self {
        let mut doc = Document::with_version(options.version.as_str());
        let pages_id = doc.new_object_id();
        // Reserved so reference copying never mistakes it for a source object.
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! { "Type" => "Pages" }),
        );

        Self {
            doc,
            pages_id,
            kids: Vec::new(),
        }
    }

    /// Append `pages` (0-based, in order) from `source`.
    ///
    /// All indices are checked before anything is copied, so a failure leaves
    /// the builder unchanged.
    pub(crate) fn append(&mut self, mut source: Document, pages: &[usize]) -> Result<()> {
        if pages.is_empty() {
            return Ok(());
        }

        source.renumber_objects_with(self.doc.max_id + 1);

        let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();
        let page_count = page_ids.len();
        let selected = pages
            .iter()
            .map(|&page| {
                page_ids
                    .get(page)
                    .copied()
                    .ok_or(PdfDeckError::PageOutOfRange { page, page_count })
            })
            .collect::<Result<Vec<_>>>()?;

        self.doc.max_id = self.doc.max_id.max(source.max_id);
        let tree = page_tree_nodes(&source, &page_ids);

        for page_id in selected {
            self.copy_page(&source, page_id, &tree)?;
        }

        Ok(())
    }

    fn copy_page(
        &mut self,
        source: &Document,
        page_id: ObjectId,
        tree: &BTreeSet<ObjectId>,
    ) -> Result<()> {
        let original = source.get_dictionary(page_id).map_err(|e| {
            PdfDeckError::assembly(format!("Failed to read page {page_id:?}: {e}"))
        })?;

        let mut page = original.clone();
        for key in INHERITABLE {
            if !page.has(key)
                && let Some(value) = inherited_attribute(source, original, key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        page.set("Parent", self.pages_id);

        let new_id = self.doc.new_object_id();
        let mut page = Object::Dictionary(page);
        let copied = copy_references(&mut self.doc, source, &page, tree);

        let rewrite = |id: ObjectId| {
            if id == page_id {
                Some(Object::Reference(new_id))
            } else if tree.contains(&id) {
                Some(Object::Null)
            } else {
                None
            }
        };
        rewrite_references(&mut page, &rewrite);
        for id in copied {
            if let Some(object) = self.doc.objects.get_mut(&id) {
                rewrite_references(object, &rewrite);
            }
        }

        self.doc.objects.insert(new_id, page);
        trace!(?page_id, ?new_id, "Copied page");

        self.kids.push(Object::Reference(new_id));
        Ok(())
    }

    /// Number of pages appended so far.
    pub(crate) fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Close the page tree, apply compression and serialize.
    pub(crate) fn finish(mut self, options: &AssemblyOptions) -> Result<Vec<u8>> {
        let count = self.kids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => self.kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        options.compression.apply(&mut self.doc);
        self.doc.renumber_objects();

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| PdfDeckError::assembly(format!("Failed to serialize output: {e}")))?;

        Ok(bytes)
    }
}

/// Every page and every `Pages` node above one.
fn page_tree_nodes(doc: &Document, page_ids: &[ObjectId]) -> BTreeSet<ObjectId> {
    let mut nodes = BTreeSet::new();

    for &page_id in page_ids {
        let mut current = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            if !nodes.insert(current) {
                break;
            }
            let Some(parent_id) = doc
                .get_dictionary(current)
                .and_then(|node| node.get(b"Parent"))
                .and_then(Object::as_reference)
                .ok()
            else {
                break;
            };
            current = parent_id;
        }
    }

    nodes
}

/// Look up `key` on the page or the nearest ancestor that defines it.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = page;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }

        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }

    None
}
