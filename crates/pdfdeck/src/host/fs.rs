//! File-system backed [`Host`].
//!
//! Writes are atomic: content goes to a temporary sibling first and is
//! renamed over the target, so an interrupted save never leaves a truncated
//! PDF behind.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tokio::fs;
use tracing::debug;

use super::{Host, OpenRequest, SaveRequest};
use crate::error::{PdfDeckError, Result};

/// Synchronous dialog provider used by [`FsHost`].
pub trait Dialogs: Send + Sync {
    /// Paths chosen in an open dialog, or `None` if cancelled.
    fn pick_open(&self, request: &OpenRequest) -> Option<Vec<PathBuf>>;

    /// Path chosen in a save dialog, or `None` if cancelled.
    fn pick_save(&self, request: &SaveRequest) -> Option<PathBuf>;
}

/// Dialogs that answer with paths decided up front.
///
/// Each preset answers one dialog; later dialogs read as cancelled.
#[derive(Debug, Default)]
pub struct PresetDialogs {
    open: Mutex<Option<Vec<PathBuf>>>,
    save: Mutex<Option<PathBuf>>,
}

impl PresetDialogs {
    /// Dialogs that are always cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next open dialog with `paths`.
    pub fn with_open(self, paths: Vec<PathBuf>) -> Self {
        *self.open.lock() = Some(paths);
        self
    }

    /// Answer the next save dialog with `path`.
    pub fn with_save(self, path: impl Into<PathBuf>) -> Self {
        *self.save.lock() = Some(path.into());
        self
    }

    /// Replace the answer for the next save dialog.
    pub fn set_save(&self, path: Option<PathBuf>) {
        *self.save.lock() = path;
    }
}

impl Dialogs for PresetDialogs {
    fn pick_open(&self, request: &OpenRequest) -> Option<Vec<PathBuf>> {
        let mut paths = self.open.lock().take()?;
        if !request.multiple {
            paths.truncate(1);
        }
        Some(paths)
    }

    fn pick_save(&self, _request: &SaveRequest) -> Option<PathBuf> {
        self.save.lock().take()
    }
}

/// Host that reads and writes the local file system.
#[derive(Debug, Default)]
pub struct FsHost<D = PresetDialogs> {
    dialogs: D,
}

impl<D: Dialogs> FsHost<D> {
    /// Create a host that shows dialogs through `dialogs`.
    pub fn new(dialogs: D) -> Self {
        Self { dialogs }
    }

    /// Dialog provider in use.
    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }
}

impl<D: Dialogs> Host for FsHost<D> {
    async fn pick_open(&self, request: OpenRequest) -> Option<Vec<PathBuf>> {
        self.dialogs.pick_open(&request)
    }

    async fn pick_save(&self, request: SaveRequest) -> Option<PathBuf> {
        self.dialogs.pick_save(&request)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path)
            .await
            .map_err(|e| PdfDeckError::file_io(path, e))
    }

    async fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PdfDeckError::file_io(parent, e))?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| PdfDeckError::file_io(&temp_path, e))?;

        if let Err(e) = fs::rename(&temp_path, path).await {
            fs::remove_file(&temp_path).await.ok();
            return Err(PdfDeckError::file_io(path, e));
        }

        debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
        Ok(())
    }
}
