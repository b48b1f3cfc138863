//! Configuration for pdfdeck sessions.
//!
//! This module holds the validated settings that drive a [`Session`]:
//! - Output compression
//! - Thumbnail generation limits
//! - Overwrite behavior and console verbosity
//! - Where the persisted mode lives
//!
//! It also parses the 1-based page expressions accepted on the command line.
//!
//! [`Session`]: crate::session::Session

use anyhow::{Context, Result, bail};

use crate::PdfDeckError;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Write streams as they are.
    None,
    /// Compress content streams.
    #[default]
    Standard,
    /// Also drop empty streams and unreachable objects before compressing.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfDeckError;

    /// Parse "none", "standard" or "maximum" (case-insensitive).
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfDeckError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

impl CompressionLevel {
    /// Apply this level to a document about to be serialized.
    pub(crate) fn apply(self, doc: &mut lopdf::Document) {
        match self {
            Self::None => {}
            Self::Standard => doc.compress(),
            Self::Maximum => {
                doc.delete_zero_length_streams();
                doc.prune_objects();
                doc.compress();
            }
        }
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Ask before overwriting.
    #[default]
    Prompt,
    /// Always overwrite.
    Force,
    /// Never overwrite, error if the file exists.
    NoClobber,
}

/// Limits for load-time thumbnail generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailConfig {
    /// Render thumbnails at all. When false every page gets a placeholder.
    pub enabled: bool,
    /// Only the first `max_thumbnails` pages are rendered.
    pub max_thumbnails: usize,
    /// Target width in pixels; height follows the page aspect ratio.
    pub width: u32,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_thumbnails: 50,
            width: 150,
            jpeg_quality: 70,
        }
    }
}

/// Upper bound on the number of pages one expression may name.
pub const MAX_SELECTION_PAGES: usize = 100_000;

/// Ordered list of 0-based page indices parsed from a 1-based expression.
///
/// Unlike a range set, the order of the expression is kept, so `"3,1-2"`
/// selects the third page first. Repeats are dropped after the first
/// occurrence, matching how a page selection behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: Vec<usize>,
}

impl PageSelection {
    /// Parse a page expression such as `"1-5,10,7"`.
    ///
    /// # Errors
    ///
    /// Returns an error if a number is malformed or zero, a range is
    /// reversed, the expression is empty, or it names more than
    /// [`MAX_SELECTION_PAGES`] pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfdeck::config::PageSelection;
    ///
    /// let selection = PageSelection::parse("3,1-2").unwrap();
    /// assert_eq!(selection.pages(), &[2, 0, 1]);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut pages = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;

                if start > end {
                    bail!(
                        "Invalid range {start}-{end}: start page must be less than or equal to end page"
                    );
                }

                let len = end - start + 1;
                if pages.len().saturating_add(len) > MAX_SELECTION_PAGES {
                    bail!(
                        "Invalid range {start}-{end}: a selection may name at most {MAX_SELECTION_PAGES} pages"
                    );
                }

                pages.extend((start..=end).map(|page| page - 1));
            } else {
                let page = parse_page_number(part)?;
                if pages.len() >= MAX_SELECTION_PAGES {
                    bail!(
                        "Invalid page {page}: a selection may name at most {MAX_SELECTION_PAGES} pages"
                    );
                }

                pages.push(page - 1);
            }
        }

        if pages.is_empty() {
            bail!("Page selection cannot be empty");
        }

        let mut seen = std::collections::HashSet::new();
        pages.retain(|page| seen.insert(*page));

        Ok(Self { pages })
    }

    /// Selected 0-based indices in expression order.
    pub fn pages(&self) -> &[usize] {
        &self.pages
    }

    /// Consume the selection and return its indices.
    pub fn into_pages(self) -> Vec<usize> {
        self.pages
    }
}

fn parse_page_number(s: &str) -> Result<usize> {
    let s = s.trim();
    let page: usize = s
        .parse()
        .with_context(|| format!("Invalid page number: {s}"))?;

    if page == 0 {
        bail!("Page numbers must be positive (1-indexed)");
    }

    Ok(page)
}

/// Complete configuration for a session.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Compression level for outputs.
    pub compression: CompressionLevel,

    /// Thumbnail generation limits.
    pub thumbnails: ThumbnailConfig,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Dry run - build outputs but do not write them.
    pub dry_run: bool,

    /// Settings file; the platform config directory when `None`.
    pub settings_path: Option<PathBuf>,
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet are both set, or if the
    /// thumbnail limits are unusable.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if self.thumbnails.width == 0 {
            bail!("Thumbnail width must be at least 1 pixel");
        }

        if !(1..=100).contains(&self.thumbnails.jpeg_quality) {
            bail!(
                "JPEG quality must be between 1 and 100, got {}",
                self.thumbnails.jpeg_quality
            );
        }

        Ok(())
    }

    /// Check if informational output should be displayed.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
