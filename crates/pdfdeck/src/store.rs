//! Document collection store.
//!
//! [`DocumentStore`] is the single owner of the loaded documents, their page
//! selections, the current [`Mode`] and the transient loading/error flags.
//! Every change goes through one of its named operations; nothing else holds
//! a mutable reference to a document.
//!
//! [`StoreHandle`] shares a store between tasks. Each operation takes the lock
//! for exactly one call, so operations stay atomic on a multi-threaded
//! runtime. The lock is never held across an `.await`.
//!
//! # Examples
//!
//! ```
//! use pdfdeck::model::Mode;
//! use pdfdeck::store::StoreHandle;
//!
//! let store = StoreHandle::new(Mode::Merge);
//! store.set_error(Some("Invalid PDF file".to_string()));
//! store.set_mode(Mode::Split);
//! assert!(store.is_empty());
//! assert_eq!(store.error(), None);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::model::{Document, DocumentId, Mode};
use crate::utils::move_item;

/// State container for the document collection.
#[derive(Debug, Default)]
pub struct DocumentStore {
    mode: Mode,
    documents: Vec<Document>,
    loading: bool,
    error: Option<String>,
}

impl DocumentStore {
    /// Create an empty store in `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Switch mode. Discards every document and clears the flags.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.documents.clear();
        self.error = None;
        self.loading = false;
    }

    /// Append documents at the end, keeping their order.
    pub fn add_documents(&mut self, docs: impl IntoIterator<Item = Document>) {
        self.documents.extend(docs);
    }

    /// Remove the document with `id`, if present.
    pub fn remove_document(&mut self, id: &DocumentId) {
        self.documents.retain(|doc| doc.id() != id);
    }

    /// Move the document at `from` to `to`. Out-of-range indices are ignored.
    pub fn reorder_documents(&mut self, from: usize, to: usize) {
        if !move_item(&mut self.documents, from, to) {
            debug!(from, to, len = self.documents.len(), "Ignoring document reorder");
        }
    }

    /// Remove `page` from the selection if present, otherwise append it.
    ///
    /// Pages outside the document are ignored.
    pub fn toggle_page_selection(&mut self, id: &DocumentId, page: usize) {
        if let Some(doc) = self.document_mut(id)
            && !doc.toggle_page(page)
        {
            debug!(%id, page, page_count = doc.page_count(), "Ignoring page toggle");
        }
    }

    /// Move an entry within a document's selection order.
    pub fn reorder_selected_pages(&mut self, id: &DocumentId, from: usize, to: usize) {
        if let Some(doc) = self.document_mut(id)
            && !doc.move_selected(from, to)
        {
            debug!(%id, from, to, "Ignoring selection reorder");
        }
    }

    /// Select every page in ascending order.
    pub fn select_all_pages(&mut self, id: &DocumentId) {
        if let Some(doc) = self.document_mut(id) {
            doc.select_all();
        }
    }

    /// Clear the selection.
    pub fn deselect_all_pages(&mut self, id: &DocumentId) {
        if let Some(doc) = self.document_mut(id) {
            doc.deselect_all();
        }
    }

    /// Flip the expansion flag.
    pub fn toggle_expanded(&mut self, id: &DocumentId) {
        if let Some(doc) = self.document_mut(id) {
            doc.toggle_expanded();
        }
    }

    /// Remove every document and clear the error.
    pub fn clear(&mut self) {
        self.documents.clear();
        self.error = None;
    }

    /// Set the loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Set or dismiss the error message.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Documents in collection order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by id.
    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id() == id)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Whether a load is in progress.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Pending error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Selected pages summed over all documents.
    pub fn total_selected_pages(&self) -> usize {
        self.documents
            .iter()
            .map(|doc| doc.selected_pages().len())
            .sum()
    }

    /// Whether any document has at least one selected page.
    pub fn has_selected_pages(&self) -> bool {
        self.documents
            .iter()
            .any(|doc| !doc.selected_pages().is_empty())
    }

    fn document_mut(&mut self, id: &DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| doc.id() == id)
    }
}

/// Cloneable, thread-safe handle to a [`DocumentStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreHandle {
    inner: Arc<Mutex<DocumentStore>>,
}

impl StoreHandle {
    /// Create a handle around a new store in `mode`.
    pub fn new(mode: Mode) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DocumentStore::new(mode))),
        }
    }

    /// Run a read-only closure against the store.
    pub fn read<T>(&self, f: impl FnOnce(&DocumentStore) -> T) -> T {
        f(&self.inner.lock())
    }

    /// Run several mutations as one atomic step.
    pub fn update<T>(&self, f: impl FnOnce(&mut DocumentStore) -> T) -> T {
        f(&mut self.inner.lock())
    }

    /// Copy of the collection for a build action.
    ///
    /// Documents share their byte buffers with the store, so this is cheap.
    pub fn snapshot(&self) -> Vec<Document> {
        self.inner.lock().documents().to_vec()
    }

    /// See [`DocumentStore::set_mode`].
    pub fn set_mode(&self, mode: Mode) {
        self.inner.lock().set_mode(mode);
    }

    /// See [`DocumentStore::add_documents`].
    pub fn add_documents(&self, docs: impl IntoIterator<Item = Document>) {
        self.inner.lock().add_documents(docs);
    }

    /// See [`DocumentStore::remove_document`].
    pub fn remove_document(&self, id: &DocumentId) {
        self.inner.lock().remove_document(id);
    }

    /// See [`DocumentStore::reorder_documents`].
    pub fn reorder_documents(&self, from: usize, to: usize) {
        self.inner.lock().reorder_documents(from, to);
    }

    /// See [`DocumentStore::toggle_page_selection`].
    pub fn toggle_page_selection(&self, id: &DocumentId, page: usize) {
        self.inner.lock().toggle_page_selection(id, page);
    }

    /// See [`DocumentStore::reorder_selected_pages`].
    pub fn reorder_selected_pages(&self, id: &DocumentId, from: usize, to: usize) {
        self.inner.lock().reorder_selected_pages(id, from, to);
    }

    /// See [`DocumentStore::select_all_pages`].
    pub fn select_all_pages(&self, id: &DocumentId) {
        self.inner.lock().select_all_pages(id);
    }

    /// See [`DocumentStore::deselect_all_pages`].
    pub fn deselect_all_pages(&self, id: &DocumentId) {
        self.inner.lock().deselect_all_pages(id);
    }

    /// See [`DocumentStore::toggle_expanded`].
    pub fn toggle_expanded(&self, id: &DocumentId) {
        self.inner.lock().toggle_expanded(id);
    }

    /// See [`DocumentStore::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// See [`DocumentStore::set_loading`].
    pub fn set_loading(&self, loading: bool) {
        self.inner.lock().set_loading(loading);
    }

    /// See [`DocumentStore::set_error`].
    pub fn set_error(&self, error: Option<String>) {
        self.inner.lock().set_error(error);
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.inner.lock().mode()
    }

    /// Copy of the document with `id`.
    pub fn document(&self, id: &DocumentId) -> Option<Document> {
        self.inner.lock().document(id).cloned()
    }

    /// Ids in collection order.
    pub fn document_ids(&self) -> Vec<DocumentId> {
        self.read(|store| store.documents().iter().map(|d| d.id().clone()).collect())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Whether a load is in progress.
    pub fn is_loading(&self) -> bool {
        self.inner.lock().is_loading()
    }

    /// Pending error message.
    pub fn error(&self) -> Option<String> {
        self.inner.lock().error().map(str::to_string)
    }

    /// Selected pages summed over all documents.
    pub fn total_selected_pages(&self) -> usize {
        self.inner.lock().total_selected_pages()
    }

    /// Whether any document has at least one selected page.
    pub fn has_selected_pages(&self) -> bool {
        self.inner.lock().has_selected_pages()
    }
}
