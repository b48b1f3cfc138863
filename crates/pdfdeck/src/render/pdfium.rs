use std::sync::OnceLock;

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::debug;

use super::{PageRenderer, RenderTarget};
use crate::error::{PdfDeckError, Result};

/// Process-wide binding. PDFium's library init and teardown must not race,
/// so it is bound once and never dropped; the `sync` feature serializes
/// every call made through it.
static PDFIUM: OnceLock<std::result::Result<Pdfium, String>> = OnceLock::new();

/// Renderer backed by the PDFium shared library.
///
/// All renderers share one binding, created on first use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumRenderer;

impl PdfiumRenderer {
    /// Create a renderer. Binding happens lazily on first render.
    pub fn new() -> Self {
        Self
    }

    /// Whether a PDFium library can be bound on this system.
    pub fn is_available() -> bool {
        pdfium().is_ok()
    }
}

/// The shared binding; a failed bind is remembered.
fn pdfium() -> Result<&'static Pdfium> {
    PDFIUM
        .get_or_init(|| bind().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| PdfDeckError::render(format!("Failed to initialize PDFium: {e}")))
}

/// Bind PDFium from the working directory, `/opt/pdfium/lib`, or the system.
fn bind() -> std::result::Result<Pdfium, PdfiumError> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())?;

    debug!("Bound PDFium library");
    Ok(Pdfium::new(bindings))
}

impl PageRenderer for PdfiumRenderer {
    fn render(
        &self,
        pdf: &[u8],
        pages: &[usize],
        target: RenderTarget,
    ) -> Result<Vec<Result<DynamicImage>>> {
        let pdfium = pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| PdfDeckError::render(format!("Failed to open document: {e}")))?;

        let config = match target {
            RenderTarget::Width(width) => PdfRenderConfig::new().set_target_width(width as i32),
            RenderTarget::Scale(scale) => PdfRenderConfig::new().scale_page_by_factor(scale),
        };
        let config = config.render_form_data(true).render_annotations(true);

        let document_pages = document.pages();
        let rendered = pages
            .iter()
            .map(|&index| {
                let page_index = u16::try_from(index)
                    .map_err(|_| PdfDeckError::render(format!("page {index} is out of range")))?;
                let page = document_pages.get(page_index).map_err(|e| {
                    PdfDeckError::render(format!("Failed to get page {}: {e}", index + 1))
                })?;

                let bitmap = page.render_with_config(&config).map_err(|e| {
                    PdfDeckError::render(format!("Failed to render page {}: {e}", index + 1))
                })?;

                Ok(bitmap.as_image())
            })
            .collect();

        debug!(pages = pages.len(), ?target, "Rendered pages with PDFium");
        Ok(rendered)
    }
}
