//! pdfium-backed extraction: text layer, page counting, and page
//! rasterization for the OCR backends.

use crate::backend::PageExtractor;
use crate::error::{Error, Result};
use image::GrayImage;
use pdfium_render::prelude::*;
use std::path::Path;

const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Bind a fresh Pdfium instance.
///
/// Prefers a pdfium library next to the executable, falling back to the
/// system library. Bindings are cheap to create once the library is loaded,
/// so each call gets its own instance and no pdfium state is shared across
/// threads.
fn bind_pdfium() -> std::result::Result<Pdfium, String> {
    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| format!("Failed to initialize pdfium: {e}"))
}

fn load_document<'a>(pdfium: &'a Pdfium, bytes: &'a [u8], path: &Path) -> Result<PdfDocument<'a>> {
    pdfium
        .load_pdf_from_byte_slice(bytes, None)
        .map_err(|e| Error::DocumentOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Resolve a document's page count, failing fast on a missing or invalid
/// file. This is the structure resolver used by `Document::open`.
pub fn resolve_page_count(path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path).map_err(|e| Error::DocumentOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let pdfium = bind_pdfium().map_err(|message| Error::DocumentOpen {
        path: path.to_path_buf(),
        message,
    })?;
    let document = load_document(&pdfium, &bytes, path)?;
    Ok(document.pages().len() as usize)
}

/// Extract the text layer of one page.
pub(crate) fn extract_page_text(path: &Path, page_index: usize) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let pdfium = bind_pdfium().map_err(|m| Error::extraction("pdfium-text", m))?;
    let document = load_document(&pdfium, &bytes, path)?;

    let page = document
        .pages()
        .get(page_index as u16)
        .map_err(|e| Error::extraction("pdfium-text", format!("page {page_index} not loadable: {e}")))?;

    let text = page
        .text()
        .map_err(|e| Error::extraction("pdfium-text", format!("text extraction failed: {e}")))?;

    Ok(text.all())
}

/// Rasterize one page to a grayscale image at the given DPI.
///
/// Returns `Ok(None)` when the rasterizer has no page at `page_index`; the
/// OCR backend maps that to an empty extraction rather than an error, so a
/// single-backend gap never poisons the benchmark run.
pub(crate) fn render_page_grayscale(path: &Path, page_index: usize, dpi: i32) -> Result<Option<GrayImage>> {
    let bytes = std::fs::read(path)?;
    let pdfium = bind_pdfium().map_err(Error::ocr)?;
    let document = load_document(&pdfium, &bytes, path)?;

    let page = match document.pages().get(page_index as u16) {
        Ok(page) => page,
        Err(_) => return Ok(None),
    };

    let scale = dpi as f32 / PDF_POINTS_PER_INCH;
    let config = PdfRenderConfig::new()
        .set_target_width(((page.width().value * scale) as i32).max(1))
        .set_target_height(((page.height().value * scale) as i32).max(1))
        .rotate_if_landscape(PdfPageRenderRotation::None, false);

    let bitmap = page
        .render_with_config(&config)
        .map_err(|e| Error::ocr(format!("failed to render page {page_index}: {e}")))?;

    Ok(Some(bitmap.as_image().to_luma8()))
}

/// Text-layer backend over pdfium. One page per invocation.
pub struct PdfiumTextBackend;

impl PdfiumTextBackend {
    /// Probe the pdfium binding so registry construction fails fast when the
    /// library is missing, instead of at first extraction.
    pub fn new() -> Result<Self> {
        bind_pdfium().map_err(|m| Error::extraction("pdfium-text", m))?;
        Ok(Self)
    }
}

impl PageExtractor for PdfiumTextBackend {
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String> {
        extract_page_text(path, page_index)
    }
}
