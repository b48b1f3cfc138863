//! Turning raw bytes into a [`Document`].
//!
//! Loading validates the bytes with lopdf, counts pages and renders the
//! thumbnails. Parsing and rendering are CPU-bound and run on tokio's
//! blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdfdeck::config::ThumbnailConfig;
//! use pdfdeck::loader::DocumentLoader;
//! use pdfdeck::render::{NoopRenderer, ThumbnailGenerator};
//!
//! # async fn example() -> pdfdeck::Result<()> {
//! let loader = DocumentLoader::new(ThumbnailGenerator::new(
//!     Arc::new(NoopRenderer),
//!     ThumbnailConfig::default(),
//! ));
//! let bytes = tokio::fs::read("report.pdf").await?;
//! let doc = loader.load("report.pdf".into(), bytes).await?;
//! println!("{} has {} pages", doc.name(), doc.page_count());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lopdf::Document as PdfDocument;
use tokio::task;
use tracing::debug;

use crate::error::{PdfDeckError, Result};
use crate::model::Document;
use crate::render::ThumbnailGenerator;

/// Loads and validates documents.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    thumbnails: ThumbnailGenerator,
}

impl DocumentLoader {
    /// Create a loader that renders thumbnails with `thumbnails`.
    pub fn new(thumbnails: ThumbnailGenerator) -> Self {
        Self { thumbnails }
    }

    /// Thumbnail generator in use.
    pub fn thumbnails(&self) -> &ThumbnailGenerator {
        &self.thumbnails
    }

    /// Build a [`Document`] from the content of `path`.
    ///
    /// Every page starts selected in ascending order.
    ///
    /// # Errors
    ///
    /// Returns a format error if the bytes are empty, cannot be parsed, are
    /// encrypted, or contain no pages. Thumbnail failures are not errors.
    pub async fn load(&self, path: PathBuf, bytes: Vec<u8>) -> Result<Document> {
        let thumbnails = self.thumbnails.clone();

        task::spawn_blocking(move || {
            let page_count = page_count(&path, &bytes)?;
            let thumbnails = thumbnails.generate(&bytes, page_count);
            debug!(path = %path.display(), page_count, "Loaded document");

            Ok(Document::new(
                path,
                Arc::from(bytes),
                page_count,
                thumbnails,
            ))
        })
        .await?
    }

    /// Quick validity check: non-empty, parseable, at least one page.
    pub fn is_valid(bytes: &[u8]) -> bool {
        page_count(Path::new(""), bytes).is_ok()
    }
}

/// Parse `bytes` and count pages, classifying failures as format errors.
fn page_count(path: &Path, bytes: &[u8]) -> Result<usize> {
    if bytes.is_empty() {
        return Err(PdfDeckError::format(path, "File appears to be empty"));
    }

    let doc = PdfDocument::load_mem(bytes).map_err(|e| {
        let err_msg = e.to_string().to_lowercase();
        if err_msg.contains("encrypt") || err_msg.contains("password") || err_msg.contains("decrypt")
        {
            PdfDeckError::encrypted(path)
        } else {
            PdfDeckError::format(path, "Invalid PDF file")
        }
    })?;

    if doc.is_encrypted() {
        return Err(PdfDeckError::encrypted(path));
    }

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        return Err(PdfDeckError::format(path, "PDF has no pages"));
    }

    Ok(page_count)
}
