//! Tesseract OCR backends.
//!
//! Pages are rasterized with pdfium, converted to grayscale, and recognized
//! with a bilingual language pair (source script plus Latin). The per-page
//! backend rasterizes at a higher DPI than the whole-document backend, which
//! trades resolution for throughput when OCR-ing every page in one call.

use crate::backend::{DocumentExtractor, PageExtractor};
use crate::backends::pdfium;
use crate::config::OcrSettings;
use crate::error::{Error, Result};
use image::GrayImage;
use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};
use std::path::Path;

/// Fully automatic page segmentation, tesseract's default mode.
const PSM_AUTO: i32 = 3;

const TESSDATA_FALLBACK_PATHS: [&str; 6] = [
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
];

/// Locate the tessdata directory: `TESSDATA_PREFIX` wins, then well-known
/// install locations. An empty string lets tesseract use its compiled-in
/// default.
fn resolve_tessdata_path() -> String {
    std::env::var("TESSDATA_PREFIX").ok().unwrap_or_else(|| {
        TESSDATA_FALLBACK_PATHS
            .iter()
            .find(|p| Path::new(p).exists())
            .map(|p| (*p).to_string())
            .unwrap_or_default()
    })
}

/// Verify every language in a `+`-joined pair has traineddata available.
///
/// Tesseract can crash instead of erroring on a missing language file, so
/// this is checked up front when the tessdata directory is known.
fn check_languages(tessdata_path: &str, language: &str) -> Result<()> {
    if tessdata_path.is_empty() {
        return Ok(());
    }
    for lang in language.split('+').map(str::trim).filter(|l| !l.is_empty()) {
        let traineddata = Path::new(tessdata_path).join(format!("{lang}.traineddata"));
        if !traineddata.exists() {
            return Err(Error::ocr(format!(
                "language '{lang}' not found: {} does not exist",
                traineddata.display()
            )));
        }
    }
    Ok(())
}

/// Run recognition over one grayscale image.
fn recognize(image: &GrayImage, tessdata_path: &str, language: &str) -> Result<String> {
    let api = TesseractAPI::new().map_err(|e| Error::ocr(format!("failed to create Tesseract API: {e}")))?;
    api.init(tessdata_path, language)
        .map_err(|e| Error::ocr(format!("failed to initialize language '{language}': {e}")))?;
    api.set_page_seg_mode(TessPageSegMode::from_int(PSM_AUTO))
        .map_err(|e| Error::ocr(format!("failed to set page segmentation mode: {e}")))?;

    let (width, height) = image.dimensions();
    api.set_image(image.as_raw(), width as i32, height as i32, 1, width as i32)
        .map_err(|e| Error::ocr(format!("failed to set image: {e}")))?;
    api.recognize()
        .map_err(|e| Error::ocr(format!("recognition failed: {e}")))?;
    api.get_utf8_text()
        .map_err(|e| Error::ocr(format!("failed to read recognized text: {e}")))
}

/// OCR one page: rasterize, grayscale, recognize.
///
/// A page the rasterizer cannot produce yields an empty extraction, distinct
/// from a hard OCR error, so one backend's gap never aborts a benchmark run.
fn ocr_page(path: &Path, page_index: usize, dpi: i32, tessdata_path: &str, language: &str) -> Result<String> {
    match pdfium::render_page_grayscale(path, page_index, dpi)? {
        Some(image) => recognize(&image, tessdata_path, language),
        None => {
            tracing::debug!(page_index, "rasterizer produced no image, returning empty text");
            Ok(String::new())
        }
    }
}

/// Per-page OCR backend.
pub struct OcrPageBackend {
    language: String,
    dpi: i32,
    tessdata_path: String,
}

impl OcrPageBackend {
    pub fn new(settings: &OcrSettings) -> Result<Self> {
        let tessdata_path = resolve_tessdata_path();
        check_languages(&tessdata_path, &settings.language)?;
        Ok(Self {
            language: settings.language.clone(),
            dpi: settings.page_dpi,
            tessdata_path,
        })
    }
}

impl PageExtractor for OcrPageBackend {
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String> {
        ocr_page(path, page_index, self.dpi, &self.tessdata_path, &self.language)
    }
}

/// Whole-document OCR backend: rasterizes and recognizes every page in one
/// invocation, at a lower default DPI than the per-page backend.
pub struct OcrDocumentBackend {
    language: String,
    dpi: i32,
    tessdata_path: String,
}

impl OcrDocumentBackend {
    pub fn new(settings: &OcrSettings) -> Result<Self> {
        let tessdata_path = resolve_tessdata_path();
        check_languages(&tessdata_path, &settings.language)?;
        Ok(Self {
            language: settings.language.clone(),
            dpi: settings.document_dpi,
            tessdata_path,
        })
    }
}

impl DocumentExtractor for OcrDocumentBackend {
    fn extract_all_pages(&self, path: &Path) -> Result<Vec<String>> {
        let page_count = pdfium::resolve_page_count(path)?;
        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            pages.push(ocr_page(
                path,
                page_index,
                self.dpi,
                &self.tessdata_path,
                &self.language,
            )?);
        }
        Ok(pages)
    }
}
