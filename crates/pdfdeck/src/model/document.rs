//! A loaded source document and its page selection.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use super::Thumbnail;
use crate::utils::move_item;

/// Opaque identity of a document within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh id.
    pub fn generate() -> Self {
        Self(format!("pdf_{}", Uuid::new_v4().simple()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One loaded PDF source.
///
/// Everything except the page selection and the expansion flag is fixed at
/// construction. Those two are only changed through
/// [`DocumentStore`](crate::store::DocumentStore).
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    name: String,
    path: PathBuf,
    bytes: Arc<[u8]>,
    page_count: usize,
    thumbnails: Vec<Thumbnail>,
    selected_pages: Vec<usize>,
    expanded: bool,
}

impl Document {
    /// Build a document with every page selected in ascending order.
    pub(crate) fn new(
        path: PathBuf,
        bytes: Arc<[u8]>,
        page_count: usize,
        thumbnails: Vec<Thumbnail>,
    ) -> Self {
        Self {
            id: DocumentId::generate(),
            name: display_name(&path),
            path,
            bytes,
            page_count,
            thumbnails,
            selected_pages: (0..page_count).collect(),
            expanded: false,
        }
    }

    /// Unique id.
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Display name derived from the source path.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Original file-system path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Original file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Total pages in the source.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// All thumbnails as generated at load time.
    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    /// Thumbnail for a 0-based page; missing entries read as placeholders.
    pub fn thumbnail(&self, page: usize) -> &Thumbnail {
        static PLACEHOLDER: Thumbnail = Thumbnail::Placeholder;
        self.thumbnails.get(page).unwrap_or(&PLACEHOLDER)
    }

    /// Selected 0-based page indices in output order.
    pub fn selected_pages(&self) -> &[usize] {
        &self.selected_pages
    }

    /// Whether the page list is expanded in the UI.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether `page` is currently selected.
    pub fn is_selected(&self, page: usize) -> bool {
        self.selected_pages.contains(&page)
    }

    /// Pages that are not part of the selection, ascending.
    pub fn unselected_pages(&self) -> Vec<usize> {
        (0..self.page_count)
            .filter(|page| !self.is_selected(*page))
            .collect()
    }

    /// Returns false if `page` is outside the document and nothing changed.
    pub(crate) fn toggle_page(&mut self, page: usize) -> bool {
        if page >= self.page_count {
            return false;
        }

        if let Some(pos) = self.selected_pages.iter().position(|&p| p == page) {
            self.selected_pages.remove(pos);
        } else {
            self.selected_pages.push(page);
        }
        true
    }

    pub(crate) fn move_selected(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.selected_pages, from, to)
    }

    pub(crate) fn select_all(&mut self) {
        self.selected_pages = (0..self.page_count).collect();
    }

    pub(crate) fn deselect_all(&mut self) {
        self.selected_pages.clear();
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// Last path component, accepting both separators.
fn display_name(path: &Path) -> String {
    path.to_string_lossy()
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("Unknown.pdf")
        .to_string()
}

#[cfg(test)]
pub(crate) fn test_document(name: &str, page_count: usize) -> Document {
    Document::new(
        PathBuf::from(format!("/docs/{name}")),
        Arc::from(Vec::new()),
        page_count,
        Vec::new(),
    )
}
