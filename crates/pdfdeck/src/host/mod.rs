//! Capabilities the embedding shell provides to a session.
//!
//! A [`Session`](crate::session::Session) never touches the file system or
//! shows a dialog itself. Everything goes through a [`Host`], which keeps
//! the core testable with in-memory fakes.

mod fs;

pub use fs::{Dialogs, FsHost, PresetDialogs};

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File-type filter shown in a file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human-readable name, e.g. `PDF Files`.
    pub name: String,
    /// Accepted extensions without the dot.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// The filter used for every pdfdeck dialog.
    pub fn pdf() -> Self {
        Self {
            name: "PDF Files".to_string(),
            extensions: vec!["pdf".to_string()],
        }
    }
}

/// Parameters for an open dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    /// Allow picking several files.
    pub multiple: bool,
    /// Accepted file types.
    pub filter: FileFilter,
}

/// Parameters for a save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// File name pre-filled in the dialog.
    pub suggested_name: String,
    /// Accepted file types.
    pub filter: FileFilter,
}

/// Dialogs and file access supplied by the shell.
pub trait Host: Send + Sync {
    /// Show an open dialog. `None` means the user cancelled.
    fn pick_open(&self, request: OpenRequest) -> impl Future<Output = Option<Vec<PathBuf>>> + Send;

    /// Show a save dialog. `None` means the user cancelled.
    fn pick_save(&self, request: SaveRequest) -> impl Future<Output = Option<PathBuf>> + Send;

    /// Read a whole file.
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Write a whole file, replacing any existing content.
    fn write(&self, path: &Path, bytes: &[u8]) -> impl Future<Output = Result<()>> + Send;
}
