//! CLI argument parsing for pdfdeck.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also included by `build.rs` to render the man page, so it may only
//! depend on crates listed under `[build-dependencies]`.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use pdfdeck::config::{CompressionLevel, Config, OverwriteMode, PageSelection, ThumbnailConfig};
use pdfdeck::error::{PdfDeckError, Result};
use pdfdeck::model::PageSpan;

/// Merge PDF documents and extract, reorder or split their pages.
///
/// Page numbers on the command line are 1-based. Page lists keep the order
/// they are written in, so `--pages 3,1-2` puts page 3 first.
#[derive(Parser, Debug)]
#[command(name = "pdfdeck")]
#[command(version)]
#[command(about = "Merge PDF documents and extract, reorder or split their pages", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Operation to perform
    #[command(subcommand)]
    pub command: Command,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output - show details and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Force overwrite of existing output files without confirmation
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Never overwrite existing output files
    #[arg(long, global = true, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Dry run - build outputs but do not write them
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Compression level for output PDFs
    ///
    /// - none: No compression
    /// - standard: Compress streams (default)
    /// - maximum: Drop empty streams and unreferenced objects, then compress
    #[arg(short, long, global = true, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard", "maximum"])]
    pub compression: String,

    /// Settings file used by the `mode` command
    ///
    /// Defaults to pdfdeck/settings.json in the user configuration directory.
    #[arg(long, global = true, value_name = "FILE", env = "PDFDECK_SETTINGS")]
    pub settings: Option<PathBuf>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge selected pages of several PDFs into one document
    ///
    /// Examples:
    ///   pdfdeck merge a.pdf b.pdf -o combined.pdf
    ///   pdfdeck merge chapter*.pdf --select 2:3,1 -o book.pdf
    Merge {
        /// Input PDF files or glob patterns, merged in order
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,

        /// Output PDF file [default: merged.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Pages to take from one input, as DOC:PAGES (e.g. 2:5,1-3)
        ///
        /// DOC is the 1-based position among the inputs that loaded.
        /// Inputs without a selection contribute every page.
        #[arg(short, long = "select", value_name = "DOC:PAGES")]
        selections: Vec<String>,
    },

    /// Extract pages of one PDF into a new document, in the given order
    Extract {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages to extract (e.g. "4,1-3")
        #[arg(short, long, value_name = "PAGES")]
        pages: String,

        /// Output PDF file [default: <name>_extracted.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Split one PDF into several files by page range
    Split {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page range for one part (e.g. 1-4); repeat for more parts
        #[arg(short, long = "range", value_name = "A-B", required = true)]
        ranges: Vec<String>,

        /// Directory the parts are written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },

    /// Render page thumbnails as JPEG files (requires PDFium)
    Thumbnails {
        /// Source PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Directory the thumbnails are written to
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Thumbnail width in pixels
        #[arg(long, value_name = "PX", default_value_t = 150)]
        width: u32,

        /// Maximum number of pages to render
        #[arg(long, value_name = "N", default_value_t = 50)]
        max: usize,
    },

    /// Show page counts and sizes of PDF files
    Info {
        /// PDF files or glob patterns
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<String>,
    },

    /// Show or set the remembered mode
    Mode {
        /// New mode
        #[arg(value_parser = ["merge", "split"])]
        mode: Option<String>,
    },
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is invalid or the resulting
    /// configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        // Only the thumbnails command renders anything
        let thumbnails = match &self.command {
            Command::Thumbnails { width, max, .. } => ThumbnailConfig {
                enabled: true,
                width: *width,
                max_thumbnails: *max,
                ..Default::default()
            },
            _ => ThumbnailConfig {
                enabled: false,
                ..Default::default()
            },
        };

        let config = Config {
            compression,
            thumbnails,
            overwrite_mode,
            quiet: self.quiet,
            verbose: self.verbose,
            dry_run: self.dry_run,
            settings_path: self.settings.clone(),
        };

        config.validate().map_err(|e| {
            PdfDeckError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate page expressions before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error for the first malformed selection or range.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Merge { selections, .. } => {
                for selection in selections {
                    parse_selection(selection)?;
                }
            }
            Command::Extract { pages, .. } => {
                PageSelection::parse(pages)?;
            }
            Command::Split { ranges, .. } => {
                for range in ranges {
                    parse_span(range)?;
                }
            }
            Command::Thumbnails { width, .. } if *width == 0 => {
                return Err(PdfDeckError::invalid_config(
                    "Thumbnail width must be at least 1",
                ));
            }
            _ => {}
        }

        Ok(())
    }
}

/// Parse `DOC:PAGES` into a 0-based document position and its pages.
pub fn parse_selection(s: &str) -> anyhow::Result<(usize, PageSelection)> {
    let Some((doc, pages)) = s.split_once(':') else {
        bail!("Invalid selection '{s}': expected DOC:PAGES, e.g. 2:1-3");
    };

    let doc: usize = doc
        .trim()
        .parse()
        .with_context(|| format!("Invalid document number in '{s}'"))?;
    if doc == 0 {
        bail!("Document numbers must be positive (1-indexed)");
    }

    let pages = PageSelection::parse(pages).with_context(|| format!("Invalid selection '{s}'"))?;
    Ok((doc - 1, pages))
}

/// Parse `A-B` (or a single page `A`) into a 0-based inclusive span.
pub fn parse_span(s: &str) -> anyhow::Result<PageSpan> {
    let (start, end) = s.split_once('-').unwrap_or((s, s));

    let start = parse_page(start, s)?;
    let end = parse_page(end, s)?;
    if start > end {
        bail!("Invalid range {s}: start page must be less than or equal to end page");
    }

    Ok(PageSpan::new(start - 1, end - 1))
}

fn parse_page(page: &str, range: &str) -> anyhow::Result<usize> {
    let page: usize = page
        .trim()
        .parse()
        .with_context(|| format!("Invalid page number in range '{range}'"))?;
    if page == 0 {
        bail!("Page numbers must be positive (1-indexed)");
    }
    Ok(page)
}

/// Expand glob patterns, keeping command-line order.
///
/// A pattern that matches nothing is kept as a literal path so the loader
/// can report it.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut resolved = Vec::new();

    for pattern in patterns {
        let before = resolved.len();
        let paths =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        for entry in paths {
            resolved.push(entry.with_context(|| format!("Failed to read match for {pattern}"))?);
        }

        if resolved.len() == before {
            resolved.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved)
}
