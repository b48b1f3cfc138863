//! Data model: documents, thumbnails and the application mode.

mod document;
mod mode;
mod thumbnail;

pub use document::{Document, DocumentId};
pub use mode::Mode;
pub use thumbnail::Thumbnail;

#[cfg(test)]
pub(crate) use document::test_document;

use std::ops::RangeInclusive;

use crate::error::{PdfDeckError, Result};

/// Result of a build action, waiting to be previewed or saved.
#[derive(Debug, Clone)]
pub struct Preview {
    /// Serialized output document.
    pub bytes: Vec<u8>,
    /// Suggested file name for the save dialog.
    pub file_name: String,
    /// Which mode produced it.
    pub kind: Mode,
}

impl Preview {
    /// Number of pages in the built document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be parsed.
    pub fn page_count(&self) -> Result<usize> {
        let doc = lopdf::Document::load_mem(&self.bytes)
            .map_err(|e| PdfDeckError::assembly(format!("Failed to parse {}: {e}", self.file_name)))?;
        Ok(doc.get_pages().len())
    }
}

/// Inclusive 0-based page range for splitting a document into parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpan {
    /// First page (0-based).
    pub start: usize,
    /// Last page (0-based, inclusive).
    pub end: usize,
    /// Output file name; `<base>_part<N>.pdf` when absent.
    pub file_name: Option<String>,
}

impl PageSpan {
    /// Create a span without an explicit file name.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            file_name: None,
        }
    }

    /// Page indices covered by this span, ascending.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// One output of a range split.
#[derive(Debug, Clone)]
pub struct SplitPart {
    /// File name for this part.
    pub file_name: String,
    /// Serialized document.
    pub bytes: Vec<u8>,
}
