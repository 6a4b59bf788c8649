//! Pure-Rust text extraction via lopdf.

use crate::backend::PageExtractor;
use crate::error::{Error, Result};
use std::path::Path;

/// Text-layer backend over lopdf. One page per invocation.
///
/// lopdf numbers pages from 1; the public contract stays 0-based and the
/// conversion happens here, at the adapter boundary, and nowhere else.
pub struct LopdfTextBackend;

impl LopdfTextBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LopdfTextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractor for LopdfTextBackend {
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String> {
        let document = lopdf::Document::load(path)
            .map_err(|e| Error::extraction("lopdf-text", format!("failed to load document: {e}")))?;

        let page_number = (page_index + 1) as u32;
        if !document.get_pages().contains_key(&page_number) {
            return Err(Error::extraction(
                "lopdf-text",
                format!("document has no page {page_index}"),
            ));
        }

        document
            .extract_text(&[page_number])
            .map_err(|e| Error::extraction("lopdf-text", format!("text extraction failed: {e}")))
    }
}
