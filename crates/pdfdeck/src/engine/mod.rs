//! Building output documents from selected pages.
//!
//! Three entry points share one page-copying core:
//!
//! - [`merge`] concatenates the selections of several documents.
//! - [`extract`] copies an explicit page list out of one source.
//! - [`split_ranges`] cuts one source into several files by page range.
//!
//! All functions are synchronous and CPU-bound; async callers should run them
//! on the blocking pool. Source bytes are only borrowed. A failure anywhere
//! fails the whole call and nothing partial is returned.
//!
//! # Examples
//!
//! ```no_run
//! use pdfdeck::engine::{AssemblyOptions, extract};
//!
//! # fn example(source: &[u8]) -> pdfdeck::Result<()> {
//! // Third page, then the first two
//! let bytes = extract(source, &[2, 0, 1], &AssemblyOptions::default())?;
//! std::fs::write("reordered.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```

mod pages;

use std::collections::HashMap;

use lopdf::Document as PdfDocument;
use tracing::debug;

use crate::config::{CompressionLevel, Config};
use crate::error::{PdfDeckError, Result};
use crate::model::{Document, DocumentId, PageSpan, SplitPart};

use pages::PageTreeBuilder;

/// Options applied to every output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Compression applied before serialization.
    pub compression: CompressionLevel,
    /// PDF version written in the header.
    pub version: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            compression: CompressionLevel::default(),
            version: "1.7".to_string(),
        }
    }
}

impl From<&Config> for AssemblyOptions {
    fn from(config: &Config) -> Self {
        Self {
            compression: config.compression,
            ..Default::default()
        }
    }
}

/// Merge documents in list order.
///
/// Each document contributes the pages of its override list when `overrides`
/// has an entry for its id, otherwise its current selection. Documents with
/// an empty list are skipped. Pages listed twice are copied twice.
///
/// Merging an empty slice yields a valid document with zero pages.
///
/// # Errors
///
/// Returns an error if a source cannot be parsed or a page index is out of
/// range for its source.
pub fn merge(
    documents: &[Document],
    overrides: Option<&HashMap<DocumentId, Vec<usize>>>,
    options: &AssemblyOptions,
) -> Result<Vec<u8>> {
    let mut builder = PageTreeBuilder::new(options);

    for doc in documents {
        let pages = overrides
            .and_then(|map| map.get(doc.id()))
            .map(Vec::as_slice)
            .unwrap_or_else(|| doc.selected_pages());

        if pages.is_empty() {
            debug!(name = doc.name(), "Skipping document with no selected pages");
            continue;
        }

        let source = parse(doc.bytes(), doc.name())?;
        builder.append(source, pages)?;
    }

    debug!(
        documents = documents.len(),
        pages = builder.page_count(),
        "Merged documents"
    );
    builder.finish(options)
}

/// Copy `pages` out of `source` in the given order.
///
/// # Errors
///
/// Returns an error if `source` cannot be parsed or an index is out of range.
pub fn extract(source: &[u8], pages: &[usize], options: &AssemblyOptions) -> Result<Vec<u8>> {
    let doc = parse(source, "source")?;

    let mut builder = PageTreeBuilder::new(options);
    builder.append(doc, pages)?;
    builder.finish(options)
}

/// Split `source` into one document per span.
///
/// Parts are named by the span's own file name, or `<base_name>_part<N>.pdf`
/// with `N` counting from 1.
///
/// # Errors
///
/// Returns an error if the source cannot be parsed, a span is reversed, or
/// a span reaches past the last page.
pub fn split_ranges(
    source: &[u8],
    spans: &[PageSpan],
    base_name: &str,
    options: &AssemblyOptions,
) -> Result<Vec<SplitPart>> {
    let doc = parse(source, base_name)?;
    let page_count = doc.get_pages().len();

    spans
        .iter()
        .enumerate()
        .map(|(index, span)| {
            if span.start > span.end {
                return Err(PdfDeckError::assembly(format!(
                    "Invalid page range {}-{}: start is after end",
                    span.start + 1,
                    span.end + 1
                )));
            }

            if span.end >= page_count {
                return Err(PdfDeckError::PageOutOfRange {
                    page: span.end,
                    page_count,
                });
            }

            let pages: Vec<usize> = span.pages().collect();
            let mut builder = PageTreeBuilder::new(options);
            builder.append(doc.clone(), &pages)?;

            Ok(SplitPart {
                file_name: span
                    .file_name
                    .clone()
                    .unwrap_or_else(|| format!("{base_name}_part{}.pdf", index + 1)),
                bytes: builder.finish(options)?,
            })
        })
        .collect()
}

fn parse(bytes: &[u8], label: &str) -> Result<PdfDocument> {
    PdfDocument::load_mem(bytes)
        .map_err(|e| PdfDeckError::assembly(format!("Failed to parse {label}: {e}")))
}
