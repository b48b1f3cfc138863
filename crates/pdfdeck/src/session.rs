//! Application flows on top of the store, the engine and a [`Host`].
//!
//! A [`Session`] is what a front end talks to. It turns user intents
//! ("load these files", "preview the merge", "save it") into store mutations,
//! engine calls on the blocking pool and host I/O, and reports failures both
//! as return values and through the store's error message.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdfdeck::config::Config;
//! use pdfdeck::host::{FsHost, PresetDialogs};
//! use pdfdeck::render::NoopRenderer;
//! use pdfdeck::session::Session;
//! use pdfdeck::settings::MemorySettingsStore;
//!
//! # async fn example() -> pdfdeck::Result<()> {
//! let host = FsHost::new(PresetDialogs::new().with_save("merged.pdf"));
//! let session = Session::new(
//!     host,
//!     Arc::new(NoopRenderer),
//!     Arc::new(MemorySettingsStore::default()),
//!     Config::default(),
//! );
//!
//! session.load_paths(&["a.pdf".into(), "b.pdf".into()]).await?;
//! let preview = session.build_preview().await?;
//! session.save_preview(&preview).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::task;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::engine::{self, AssemblyOptions};
use crate::error::{PdfDeckError, Result};
use crate::host::{FileFilter, Host, OpenRequest, SaveRequest};
use crate::loader::DocumentLoader;
use crate::model::{Document, DocumentId, Mode, PageSpan, Preview, SplitPart};
use crate::render::{PageRenderer, RenderTarget, RenderedPage, ThumbnailGenerator, encode_png};
use crate::settings::{Settings, SettingsStore};
use crate::store::StoreHandle;

const PDF_ONLY: &str = "Please select PDF files only.";
const SPLIT_ONE_FILE: &str = "Split mode only accepts one PDF file at a time.";
const MERGED_FILE_NAME: &str = "merged.pdf";
const MERGE_SAVED: &str = "PDFs merged successfully!";
const EXTRACT_SAVED: &str = "Pages extracted successfully!";

/// Scale at which preview pages render before zoom is applied.
pub const PREVIEW_BASE_SCALE: f32 = 1.5;

/// A file that could not be loaded during a batch.
#[derive(Debug)]
pub struct LoadFailure {
    /// Path as given.
    pub path: PathBuf,
    /// Why it failed.
    pub error: PdfDeckError,
}

/// Outcome of a batch load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids of the documents added, in input order.
    pub loaded: Vec<DocumentId>,
    /// Files that were skipped.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True if every file loaded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of saving a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to `path`.
    Saved {
        /// Destination chosen in the save dialog.
        path: PathBuf,
        /// Confirmation shown to the user.
        message: String,
    },
    /// The save dialog was dismissed.
    Cancelled,
}

/// Drives the document collection for one front end.
pub struct Session<H> {
    host: H,
    store: StoreHandle,
    loader: DocumentLoader,
    settings: Arc<dyn SettingsStore>,
    config: Config,
}

impl<H: Host> Session<H> {
    /// Create a session, restoring the persisted mode.
    pub fn new(
        host: H,
        renderer: Arc<dyn PageRenderer>,
        settings: Arc<dyn SettingsStore>,
        config: Config,
    ) -> Self {
        let mode = settings.load().mode;
        let loader = DocumentLoader::new(ThumbnailGenerator::new(
            renderer,
            config.thumbnails.clone(),
        ));
        debug!(%mode, "Session started");

        Self {
            host,
            store: StoreHandle::new(mode),
            loader,
            settings,
            config,
        }
    }

    /// Handle to the document collection.
    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// The injected host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.store.mode()
    }

    /// Switch mode, clearing the collection, and remember the choice.
    pub fn set_mode(&self, mode: Mode) {
        self.store.set_mode(mode);
        if let Err(e) = self.settings.save(&Settings { mode }) {
            warn!("Could not persist mode: {e}");
        }
    }

    /// Load a batch of files into the collection.
    ///
    /// Non-PDF paths are ignored. Files that fail to read or parse are
    /// skipped and reported; the last failure becomes the store error. In
    /// split mode the loaded document replaces the current one.
    ///
    /// # Errors
    ///
    /// Returns an error without loading anything if no path is a PDF, or if
    /// several files are given in split mode.
    pub async fn load_paths(&self, paths: &[PathBuf]) -> Result<LoadReport> {
        if paths.is_empty() {
            return Ok(LoadReport::default());
        }

        self.store.update(|store| {
            store.set_loading(true);
            store.set_error(None);
        });

        let pdf_paths: Vec<&PathBuf> = paths.iter().filter(|p| has_pdf_extension(p)).collect();

        if pdf_paths.is_empty() {
            return Err(self.reject(PdfDeckError::other(PDF_ONLY)));
        }

        let mode = self.store.mode();
        if mode == Mode::Split && pdf_paths.len() > 1 {
            return Err(self.reject(PdfDeckError::mode_constraint(SPLIT_ONE_FILE)));
        }

        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        let results: Vec<(PathBuf, Result<Document>)> = stream::iter(pdf_paths)
            .map(|path| async move { (path.clone(), self.load_one(path).await) })
            .buffered(workers)
            .collect()
            .await;

        let mut report = LoadReport::default();
        let mut documents = Vec::new();
        let mut last_error = None;

        for (path, result) in results {
            match result {
                Ok(doc) => {
                    report.loaded.push(doc.id().clone());
                    documents.push(doc);
                }
                Err(error) => {
                    warn!(path = %path.display(), "Skipping file: {error}");
                    last_error = Some(error.notice());
                    report.failures.push(LoadFailure { path, error });
                }
            }
        }

        self.store.update(|store| {
            if mode == Mode::Split && !documents.is_empty() {
                store.clear();
            }
            store.add_documents(documents);
            if last_error.is_some() {
                store.set_error(last_error);
            }
            store.set_loading(false);
        });

        info!(
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Batch load finished"
        );
        Ok(report)
    }

    async fn load_one(&self, path: &Path) -> Result<Document> {
        let bytes = self.host.read(path).await?;
        self.loader.load(path.to_path_buf(), bytes).await
    }

    /// Ask the host for files and load them.
    ///
    /// Returns `None` if the dialog was cancelled.
    pub async fn open_files(&self) -> Result<Option<LoadReport>> {
        let request = OpenRequest {
            multiple: self.mode().allows_multiple(),
            filter: FileFilter::pdf(),
        };

        match self.host.pick_open(request).await {
            Some(paths) => self.load_paths(&paths).await.map(Some),
            None => Ok(None),
        }
    }

    /// Build the output for the current mode without saving it.
    ///
    /// # Errors
    ///
    /// Returns [`PdfDeckError::NothingSelected`] if there is nothing to
    /// build. Engine failures are also stored as the store error; the
    /// collection is never modified.
    pub async fn build_preview(&self) -> Result<Preview> {
        let options = AssemblyOptions::from(&self.config);
        let mode = self.store.mode();

        let result = match mode {
            Mode::Merge => {
                if !self.store.has_selected_pages() {
                    return Err(PdfDeckError::NothingSelected);
                }
                let documents = self.store.snapshot();
                task::spawn_blocking(move || engine::merge(&documents, None, &options))
                    .await
                    .map_err(PdfDeckError::from)
                    .and_then(|result| result)
                    .map(|bytes| (bytes, MERGED_FILE_NAME.to_string()))
            }
            Mode::Split => {
                let Some(doc) = self.store.snapshot().into_iter().next() else {
                    return Err(PdfDeckError::NothingSelected);
                };
                if doc.selected_pages().is_empty() {
                    return Err(PdfDeckError::NothingSelected);
                }
                let file_name = format!("{}_extracted.pdf", base_name(doc.name()));
                task::spawn_blocking(move || {
                    engine::extract(doc.bytes(), doc.selected_pages(), &options)
                })
                .await
                .map_err(PdfDeckError::from)
                .and_then(|result| result)
                .map(|bytes| (bytes, file_name))
            }
        };

        match result {
            Ok((bytes, file_name)) => {
                debug!(%mode, bytes = bytes.len(), %file_name, "Preview built");
                Ok(Preview {
                    bytes,
                    file_name,
                    kind: mode,
                })
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Ask the host where to save `preview` and write it there.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails; the message is also stored.
    pub async fn save_preview(&self, preview: &Preview) -> Result<SaveOutcome> {
        let request = SaveRequest {
            suggested_name: preview.file_name.clone(),
            filter: FileFilter::pdf(),
        };

        let Some(path) = self.host.pick_save(request).await else {
            debug!("Save cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        if let Err(e) = self.host.write(&path, &preview.bytes).await {
            self.store.set_error(Some(e.notice()));
            return Err(e);
        }

        let message = match preview.kind {
            Mode::Merge => MERGE_SAVED,
            Mode::Split => EXTRACT_SAVED,
        };
        info!(path = %path.display(), "{message}");

        Ok(SaveOutcome::Saved {
            path,
            message: message.to_string(),
        })
    }

    /// Cut a loaded document into one output per span.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not loaded or a span is invalid.
    pub async fn split_document(&self, id: &DocumentId, spans: Vec<PageSpan>) -> Result<Vec<SplitPart>> {
        let doc = self
            .store
            .document(id)
            .ok_or_else(|| PdfDeckError::other(format!("Document {id} is not loaded")))?;

        let options = AssemblyOptions::from(&self.config);
        let base = base_name(doc.name()).to_string();

        let result = task::spawn_blocking(move || {
            engine::split_ranges(doc.bytes(), &spans, &base, &options)
        })
        .await
        .map_err(PdfDeckError::from)
        .and_then(|result| result);

        result.map_err(|e| self.reject(e))
    }

    /// Write split parts into `dir`, returning the paths written.
    ///
    /// # Errors
    ///
    /// Stops at the first write failure.
    pub async fn save_parts(&self, parts: &[SplitPart], dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(parts.len());
        for part in parts {
            let path = dir.join(&part.file_name);
            if let Err(e) = self.host.write(&path, &part.bytes).await {
                self.store.set_error(Some(e.notice()));
                return Err(e);
            }
            written.push(path);
        }
        Ok(written)
    }

    /// Render one page of a preview as PNG.
    ///
    /// `page_number` is 1-based. The page is drawn at
    /// [`PREVIEW_BASE_SCALE`] times `zoom`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or cannot be rendered.
    pub async fn render_preview_page(
        &self,
        preview: &Preview,
        page_number: usize,
        zoom: f32,
    ) -> Result<RenderedPage> {
        let Some(index) = page_number.checked_sub(1) else {
            return Err(PdfDeckError::PageOutOfRange {
                page: 0,
                page_count: preview.page_count()?,
            });
        };

        let renderer = Arc::clone(self.loader.thumbnails().renderer());
        let bytes = preview.bytes.clone();
        let target = RenderTarget::Scale(PREVIEW_BASE_SCALE * zoom);

        task::spawn_blocking(move || {
            let image = renderer
                .render(&bytes, &[index], target)?
                .into_iter()
                .next()
                .ok_or_else(|| PdfDeckError::render(format!("page {page_number} was not rendered")))??;
            encode_png(&image, page_number)
        })
        .await?
    }

    /// Store the error's notice, clear the loading flag and hand it back.
    fn reject(&self, error: PdfDeckError) -> PdfDeckError {
        self.store.update(|store| {
            store.set_error(Some(error.notice()));
            store.set_loading(false);
        });
        error
    }
}

/// Case-insensitive `.pdf` extension check.
fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Display name without a trailing `.pdf`, case-insensitive.
fn base_name(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &name[..split],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::BlankRenderer;
    use crate::settings::MemorySettingsStore;
    use crate::testing::{page_widths, sample_pdf, sample_pdf_from};
    use parking_lot::Mutex;
    use rstest::rstest;
    use std::collections::HashMap;

    /// In-memory host: files come from a map, writes are recorded.
    #[derive(Default)]
    struct FakeHost {
        files: HashMap<PathBuf, Vec<u8>>,
        written: Mutex<HashMap<PathBuf, Vec<u8>>>,
        open: Mutex<Option<Vec<PathBuf>>>,
        open_requests: Mutex<Vec<OpenRequest>>,
        save: Option<PathBuf>,
        fail_writes: bool,
    }

    impl FakeHost {
        fn with_file(mut self, path: &str, bytes: Vec<u8>) -> Self {
            self.files.insert(PathBuf::from(path), bytes);
            self
        }

        fn written(&self, path: &str) -> Option<Vec<u8>> {
            self.written.lock().get(Path::new(path)).cloned()
        }
    }

    impl Host for FakeHost {
        async fn pick_open(&self, request: OpenRequest) -> Option<Vec<PathBuf>> {
            self.open_requests.lock().push(request);
            self.open.lock().take()
        }

        async fn pick_save(&self, _request: SaveRequest) -> Option<PathBuf> {
            self.save.clone()
        }

        async fn read(&self, path: &Path) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                PdfDeckError::file_io(path, std::io::Error::from(std::io::ErrorKind::NotFound))
            })
        }

        async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
            if self.fail_writes {
                return Err(PdfDeckError::file_io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
                ));
            }
            self.written.lock().insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }
    }

    fn session(host: FakeHost) -> Session<FakeHost> {
        Session::new(
            host,
            Arc::new(BlankRenderer::default()),
            Arc::new(MemorySettingsStore::default()),
            Config::default(),
        )
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(PathBuf::from).collect()
    }

    fn names(session: &Session<FakeHost>) -> Vec<String> {
        session
            .store()
            .read(|store| store.documents().iter().map(|d| d.name().to_string()).collect())
    }

    #[rstest]
    #[case("report.pdf", true)]
    #[case("REPORT.PDF", true)]
    #[case("notes.txt", false)]
    #[case("pdf", false)]
    fn test_has_pdf_extension(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(has_pdf_extension(Path::new(path)), expected);
    }

    #[rstest]
    #[case("report.pdf", "report")]
    #[case("Scan.PDF", "Scan")]
    #[case("archive.pdf.bak", "archive.pdf.bak")]
    #[case("pdf", "pdf")]
    fn test_base_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(base_name(name), expected);
    }

    #[tokio::test]
    async fn test_new_restores_persisted_mode() {
        let settings = Arc::new(MemorySettingsStore::new(Settings { mode: Mode::Split }));
        let session = Session::new(
            FakeHost::default(),
            Arc::new(BlankRenderer::default()),
            settings.clone(),
            Config::default(),
        );
        assert_eq!(session.mode(), Mode::Split);

        session.set_mode(Mode::Merge);
        assert_eq!(settings.load().mode, Mode::Merge);
    }

    #[tokio::test]
    async fn test_batch_skips_corrupt_file_and_keeps_order() {
        let host = FakeHost::default()
            .with_file("/in/one.pdf", sample_pdf(2))
            .with_file("/in/corrupt.pdf", b"garbage".to_vec())
            .with_file("/in/two.pdf", sample_pdf(3));
        let session = session(host);

        let report = session
            .load_paths(&paths(&["/in/one.pdf", "/in/corrupt.pdf", "/in/two.pdf"]))
            .await
            .unwrap();

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, PathBuf::from("/in/corrupt.pdf"));
        assert_eq!(names(&session), vec!["one.pdf", "two.pdf"]);
        assert_eq!(session.store().error().as_deref(), Some("Invalid PDF file"));
        assert!(!session.store().is_loading());
    }

    #[tokio::test]
    async fn test_batch_reports_missing_file() {
        let host = FakeHost::default().with_file("/in/one.pdf", sample_pdf(1));
        let session = session(host);

        let report = session
            .load_paths(&paths(&["/in/one.pdf", "/in/gone.pdf"]))
            .await
            .unwrap();

        assert!(!report.is_complete());
        assert!(matches!(report.failures[0].error, PdfDeckError::FileIo { .. }));
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_non_pdf_paths_are_rejected() {
        let session = session(FakeHost::default());
        let err = session
            .load_paths(&paths(&["/in/notes.txt", "/in/photo.png"]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), PDF_ONLY);
        assert_eq!(session.store().error().as_deref(), Some(PDF_ONLY));
        assert!(!session.store().is_loading());
    }

    #[tokio::test]
    async fn test_split_mode_rejects_several_files() {
        let host = FakeHost::default()
            .with_file("/in/a.pdf", sample_pdf(1))
            .with_file("/in/b.pdf", sample_pdf(1));
        let session = session(host);
        session.set_mode(Mode::Split);

        let err = session
            .load_paths(&paths(&["/in/a.pdf", "/in/b.pdf"]))
            .await
            .unwrap_err();

        assert!(matches!(err, PdfDeckError::ModeConstraint { .. }));
        assert_eq!(session.store().error().as_deref(), Some(SPLIT_ONE_FILE));
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_split_mode_replaces_document() {
        let host = FakeHost::default()
            .with_file("/in/a.pdf", sample_pdf(1))
            .with_file("/in/b.pdf", sample_pdf(2));
        let session = session(host);
        session.set_mode(Mode::Split);

        session.load_paths(&paths(&["/in/a.pdf"])).await.unwrap();
        session.load_paths(&paths(&["/in/b.pdf"])).await.unwrap();

        assert_eq!(names(&session), vec!["b.pdf"]);
    }

    #[tokio::test]
    async fn test_open_files_uses_mode_for_multiple() {
        let host = FakeHost::default().with_file("/in/a.pdf", sample_pdf(1));
        *host.open.lock() = Some(paths(&["/in/a.pdf"]));
        let session = session(host);
        session.set_mode(Mode::Split);

        let report = session.open_files().await.unwrap().unwrap();
        assert_eq!(report.loaded.len(), 1);

        let requests = session.host().open_requests.lock();
        assert!(!requests[0].multiple);
        assert_eq!(requests[0].filter, FileFilter::pdf());
    }

    #[tokio::test]
    async fn test_open_files_cancelled() {
        let session = session(FakeHost::default());
        assert!(session.open_files().await.unwrap().is_none());
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_merge_preview_and_save() {
        let host = FakeHost {
            save: Some(PathBuf::from("/out/merged.pdf")),
            ..Default::default()
        }
        .with_file("/in/a.pdf", sample_pdf_from(100, 2))
        .with_file("/in/b.pdf", sample_pdf_from(200, 1));
        let session = session(host);
        session
            .load_paths(&paths(&["/in/a.pdf", "/in/b.pdf"]))
            .await
            .unwrap();

        let ids = session.store().document_ids();
        session.store().reorder_selected_pages(&ids[0], 1, 0);

        let preview = session.build_preview().await.unwrap();
        assert_eq!(preview.file_name, "merged.pdf");
        assert_eq!(preview.kind, Mode::Merge);
        assert_eq!(page_widths(&preview.bytes), vec![101, 100, 200]);

        let outcome = session.save_preview(&preview).await.unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Saved {
                path: PathBuf::from("/out/merged.pdf"),
                message: MERGE_SAVED.to_string(),
            }
        );
        assert_eq!(
            session.host().written("/out/merged.pdf"),
            Some(preview.bytes.clone())
        );
    }

    #[tokio::test]
    async fn test_merge_preview_needs_selection() {
        let host = FakeHost::default().with_file("/in/a.pdf", sample_pdf(2));
        let session = session(host);
        session.load_paths(&paths(&["/in/a.pdf"])).await.unwrap();
        let id = session.store().document_ids().remove(0);
        session.store().deselect_all_pages(&id);

        let err = session.build_preview().await.unwrap_err();
        assert!(matches!(err, PdfDeckError::NothingSelected));
    }

    #[tokio::test]
    async fn test_split_preview_names_output() {
        let host = FakeHost::default().with_file("/in/Report.PDF", sample_pdf(3));
        let session = session(host);
        session.set_mode(Mode::Split);
        session.load_paths(&paths(&["/in/Report.PDF"])).await.unwrap();

        let id = session.store().document_ids().remove(0);
        session.store().deselect_all_pages(&id);
        session.store().toggle_page_selection(&id, 2);
        session.store().toggle_page_selection(&id, 0);

        let preview = session.build_preview().await.unwrap();
        assert_eq!(preview.file_name, "Report_extracted.pdf");
        assert_eq!(preview.kind, Mode::Split);
        assert_eq!(page_widths(&preview.bytes), vec![102, 100]);
    }

    #[tokio::test]
    async fn test_save_cancelled() {
        let session = session(FakeHost::default());
        let preview = Preview {
            bytes: sample_pdf(1),
            file_name: "merged.pdf".to_string(),
            kind: Mode::Merge,
        };

        let outcome = session.save_preview(&preview).await.unwrap();
        assert_eq!(outcome, SaveOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_save_failure_sets_error() {
        let host = FakeHost {
            save: Some(PathBuf::from("/out/x.pdf")),
            fail_writes: true,
            ..Default::default()
        };
        let session = session(host);
        let preview = Preview {
            bytes: sample_pdf(1),
            file_name: "x.pdf".to_string(),
            kind: Mode::Split,
        };

        assert!(session.save_preview(&preview).await.is_err());
        assert_eq!(session.store().error().as_deref(), Some("read-only volume"));
    }

    #[tokio::test]
    async fn test_split_document_and_save_parts() {
        let host = FakeHost::default().with_file("/in/book.pdf", sample_pdf(5));
        let session = session(host);
        session.load_paths(&paths(&["/in/book.pdf"])).await.unwrap();
        let id = session.store().document_ids().remove(0);

        let parts = session
            .split_document(&id, vec![PageSpan::new(0, 1), PageSpan::new(2, 4)])
            .await
            .unwrap();
        let written = session.save_parts(&parts, Path::new("/out")).await.unwrap();

        assert_eq!(
            written,
            paths(&["/out/book_part1.pdf", "/out/book_part2.pdf"])
        );
        let second = session.host().written("/out/book_part2.pdf").unwrap();
        assert_eq!(page_widths(&second), vec![102, 103, 104]);
    }

    #[tokio::test]
    async fn test_split_document_out_of_range_sets_error() {
        let host = FakeHost::default().with_file("/in/book.pdf", sample_pdf(2));
        let session = session(host);
        session.load_paths(&paths(&["/in/book.pdf"])).await.unwrap();
        let id = session.store().document_ids().remove(0);

        let err = session
            .split_document(&id, vec![PageSpan::new(0, 5)])
            .await
            .unwrap_err();
        assert!(matches!(err, PdfDeckError::PageOutOfRange { .. }));
        assert!(session.store().error().is_some());
        assert_eq!(session.store().len(), 1);
    }

    #[tokio::test]
    async fn test_render_preview_page_applies_zoom() {
        let session = session(FakeHost::default());
        let preview = Preview {
            bytes: sample_pdf(2),
            file_name: "merged.pdf".to_string(),
            kind: Mode::Merge,
        };

        let page = session.render_preview_page(&preview, 2, 2.0).await.unwrap();
        assert_eq!(page.page_number, 2);
        assert_eq!((page.width, page.height), (300, 600));
        assert!(page.png.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn test_render_preview_page_zero() {
        let session = session(FakeHost::default());
        let preview = Preview {
            bytes: sample_pdf(2),
            file_name: "merged.pdf".to_string(),
            kind: Mode::Merge,
        };

        let err = session.render_preview_page(&preview, 0, 1.0).await.unwrap_err();
        assert!(matches!(
            err,
            PdfDeckError::PageOutOfRange {
                page: 0,
                page_count: 2
            }
        ));
    }
}
