//! Page rendering for thumbnails and previews.
//!
//! Rendering goes through the [`PageRenderer`] trait so the rest of the crate
//! never talks to a render engine directly. [`PdfiumRenderer`] is the real
//! implementation; [`NoopRenderer`] renders nothing and is used when PDFium
//! is unavailable or thumbnails are disabled.
//!
//! Thumbnails are best effort: [`ThumbnailGenerator`] turns every failure into
//! a [`Thumbnail::Placeholder`] and never fails a load.

mod pdfium;

pub use pdfium::PdfiumRenderer;

use std::io::Cursor;
use std::sync::Arc;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::config::ThumbnailConfig;
use crate::error::{PdfDeckError, Result};
use crate::model::Thumbnail;

/// Output size requested from a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderTarget {
    /// Fixed pixel width; height keeps the aspect ratio.
    Width(u32),
    /// Scale factor applied to the page size in points.
    Scale(f32),
}

/// Renders pages of a PDF held in memory.
pub trait PageRenderer: Send + Sync {
    /// Render the 0-based `pages` of `pdf`.
    ///
    /// The outer error means the document could not be opened at all. Each
    /// inner result belongs to the page at the same position in `pages`.
    fn render(
        &self,
        pdf: &[u8],
        pages: &[usize],
        target: RenderTarget,
    ) -> Result<Vec<Result<DynamicImage>>>;
}

/// Renderer that produces no images.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl PageRenderer for NoopRenderer {
    fn render(
        &self,
        _pdf: &[u8],
        _pages: &[usize],
        _target: RenderTarget,
    ) -> Result<Vec<Result<DynamicImage>>> {
        Err(PdfDeckError::render("rendering is disabled"))
    }
}

/// A page rendered for on-screen preview.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// 1-based page number.
    pub page_number: usize,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// PNG-encoded image.
    pub png: Vec<u8>,
}

/// Creates load-time thumbnails within the configured limits.
#[derive(Clone)]
pub struct ThumbnailGenerator {
    renderer: Arc<dyn PageRenderer>,
    config: ThumbnailConfig,
}

impl std::fmt::Debug for ThumbnailGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ThumbnailGenerator {
    /// Create a generator around `renderer`.
    pub fn new(renderer: Arc<dyn PageRenderer>, config: ThumbnailConfig) -> Self {
        Self { renderer, config }
    }

    /// The renderer used for thumbnails, shared with preview rendering.
    pub fn renderer(&self) -> &Arc<dyn PageRenderer> {
        &self.renderer
    }

    /// Thumbnails for every page of `pdf`; always `page_count` entries long.
    ///
    /// Only the first `max_thumbnails` pages are rendered. Pages that fail,
    /// and every page when the document cannot be opened, get placeholders.
    pub fn generate(&self, pdf: &[u8], page_count: usize) -> Vec<Thumbnail> {
        let mut thumbnails = vec![Thumbnail::Placeholder; page_count];
        if !self.config.enabled || page_count == 0 {
            return thumbnails;
        }

        let pages: Vec<usize> = (0..page_count.min(self.config.max_thumbnails)).collect();
        let rendered = match self
            .renderer
            .render(pdf, &pages, RenderTarget::Width(self.config.width))
        {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!("Thumbnails unavailable, using placeholders: {e}");
                return thumbnails;
            }
        };

        for (page, result) in pages.into_iter().zip(rendered) {
            match result.and_then(|image| encode_jpeg(&image, self.config.jpeg_quality)) {
                Ok(thumbnail) => thumbnails[page] = thumbnail,
                Err(e) => debug!(page, "Thumbnail failed: {e}"),
            }
        }

        thumbnails
    }
}

/// Encode an image as a JPEG thumbnail.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Thumbnail> {
    let rgb = image.to_rgb8();
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
        .map_err(|e| PdfDeckError::render(format!("JPEG encoding failed: {e}")))?;

    Ok(Thumbnail::Image {
        width: rgb.width(),
        height: rgb.height(),
        jpeg,
    })
}

/// Encode an image as PNG for preview display.
pub fn encode_png(image: &DynamicImage, page_number: usize) -> Result<RenderedPage> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| {
            PdfDeckError::render(format!("Failed to encode page {page_number} as PNG: {e}"))
        })?;

    Ok(RenderedPage {
        page_number,
        width: image.width(),
        height: image.height(),
        png,
    })
}
