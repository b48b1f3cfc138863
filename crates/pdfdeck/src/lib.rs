//! pdfdeck - Merge PDF documents and extract, reorder or split their pages.
//!
//! The library keeps a collection of loaded PDFs, each with an ordered page
//! selection, and builds new documents from it:
//!
//! - **Merge mode**: any number of sources, concatenated in list order
//! - **Split mode**: one source, selected pages extracted in selection order
//! - Range splitting into several parts
//! - Thumbnails and preview rendering through PDFium
//! - Persisted mode preference
//!
//! Front ends drive everything through a [`Session`], supplying a
//! [`Host`](host::Host) for dialogs and file access.
//!
//! # Examples
//!
//! ## Session
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdfdeck::config::Config;
//! use pdfdeck::host::{FsHost, PresetDialogs};
//! use pdfdeck::render::PdfiumRenderer;
//! use pdfdeck::settings::JsonSettingsStore;
//! use pdfdeck::{Mode, Session};
//!
//! # async fn example() -> pdfdeck::Result<()> {
//! let session = Session::new(
//!     FsHost::new(PresetDialogs::new().with_save("pages.pdf")),
//!     Arc::new(PdfiumRenderer::new()),
//!     Arc::new(JsonSettingsStore::new("settings.json")),
//!     Config::default(),
//! );
//! session.set_mode(Mode::Split);
//! session.load_paths(&["book.pdf".into()]).await?;
//!
//! let id = session.store().document_ids().remove(0);
//! session.store().toggle_page_selection(&id, 0);
//!
//! let preview = session.build_preview().await?;
//! session.save_preview(&preview).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the engine directly
//!
//! ```no_run
//! use pdfdeck::engine::{AssemblyOptions, split_ranges};
//! use pdfdeck::model::PageSpan;
//!
//! # fn example() -> pdfdeck::Result<()> {
//! let source = std::fs::read("book.pdf")?;
//! let spans = [PageSpan::new(0, 9), PageSpan::new(10, 19)];
//! for part in split_ranges(&source, &spans, "book", &AssemblyOptions::default())? {
//!     std::fs::write(&part.file_name, &part.bytes)?;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod loader;
pub mod model;
pub mod render;
pub mod session;
pub mod settings;
pub mod store;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfDeckError, Result};
pub use model::{Document, DocumentId, Mode, PageSpan, Preview, Thumbnail};
pub use session::{LoadReport, SaveOutcome, Session};
pub use store::{DocumentStore, StoreHandle};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
