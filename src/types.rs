//! Core types shared across the benchmarking engine.

use serde::{Deserialize, Serialize};

/// Identifier for one extraction backend.
///
/// A closed enum rather than a string name: the registry binds each id to a
/// concrete adapter once at construction, so there is no runtime name lookup
/// and no "unknown backend name" failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BackendId {
    /// pdfium text layer, one page per call.
    PdfiumText,
    /// lopdf text extraction, one page per call.
    LopdfText,
    /// pdfium text layer shaped into markdown, one page per call.
    PdfiumMarkdown,
    /// Tesseract OCR over a rasterized page.
    OcrPage,
    /// Tesseract OCR over every page of the document in one call.
    OcrDocument,
    /// Cloud extraction service; always processes the whole document.
    RemoteParse,
}

impl BackendId {
    /// All backend ids, in presentation order.
    pub const ALL: [BackendId; 6] = [
        BackendId::PdfiumText,
        BackendId::LopdfText,
        BackendId::PdfiumMarkdown,
        BackendId::OcrPage,
        BackendId::OcrDocument,
        BackendId::RemoteParse,
    ];

    /// Stable display name, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::PdfiumText => "pdfium-text",
            BackendId::LopdfText => "lopdf-text",
            BackendId::PdfiumMarkdown => "pdfium-markdown",
            BackendId::OcrPage => "ocr-page",
            BackendId::OcrDocument => "ocr-document",
            BackendId::RemoteParse => "remote-parse",
        }
    }

    /// Whether this backend extracts one page at a time or the whole document
    /// in a single call.
    ///
    /// Granularity is a static property of the id: whole-document backends
    /// amortize one invocation across every page of the document, per-page
    /// backends pay a fixed cost per page. The benchmark preserves that
    /// distinction instead of hiding it behind a uniform signature.
    pub fn granularity(&self) -> Granularity {
        match self {
            BackendId::PdfiumText | BackendId::LopdfText | BackendId::PdfiumMarkdown | BackendId::OcrPage => {
                Granularity::PerPage
            }
            BackendId::OcrDocument | BackendId::RemoteParse => Granularity::WholeDocument,
        }
    }

    /// Static descriptor for this id.
    pub fn descriptor(&self) -> BackendDescriptor {
        BackendDescriptor {
            id: *self,
            display_name: self.as_str(),
            granularity: self.granularity(),
        }
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extraction granularity of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// Accepts a page index; one invocation per page.
    PerPage,
    /// Extracts all pages in one invocation; results are indexed by page.
    WholeDocument,
}

/// Static registry entry describing one backend for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackendDescriptor {
    pub id: BackendId,
    pub display_name: &'static str,
    pub granularity: Granularity,
}

/// Outcome of one backend invocation against one document page.
///
/// On failure `text` is empty, `error_detail` carries the failure message and
/// no elapsed time is charged (the call did not return normally).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResult {
    pub backend: BackendId,
    pub page_index: usize,
    pub text: String,
    /// Wall-clock seconds, rounded to 3 decimals. For whole-document backends
    /// every page of the document carries the single measured elapsed time.
    pub elapsed_seconds: f64,
    pub succeeded: bool,
    pub error_detail: Option<String>,
}

impl BackendResult {
    pub fn success(backend: BackendId, page_index: usize, text: String, elapsed_seconds: f64) -> Self {
        Self {
            backend,
            page_index,
            text,
            elapsed_seconds,
            succeeded: true,
            error_detail: None,
        }
    }

    pub fn failure(backend: BackendId, page_index: usize, detail: String) -> Self {
        Self {
            backend,
            page_index,
            text: String::new(),
            elapsed_seconds: 0.0,
            succeeded: false,
            error_detail: Some(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_split() {
        assert_eq!(BackendId::PdfiumText.granularity(), Granularity::PerPage);
        assert_eq!(BackendId::OcrPage.granularity(), Granularity::PerPage);
        assert_eq!(BackendId::OcrDocument.granularity(), Granularity::WholeDocument);
        assert_eq!(BackendId::RemoteParse.granularity(), Granularity::WholeDocument);
    }

    #[test]
    fn display_matches_serde_rename() {
        for id in BackendId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }

    #[test]
    fn descriptor_is_consistent() {
        let desc = BackendId::RemoteParse.descriptor();
        assert_eq!(desc.id, BackendId::RemoteParse);
        assert_eq!(desc.display_name, "remote-parse");
        assert_eq!(desc.granularity, Granularity::WholeDocument);
    }

    #[test]
    fn failure_result_shape() {
        let r = BackendResult::failure(BackendId::LopdfText, 2, "boom".to_string());
        assert!(!r.succeeded);
        assert!(r.text.is_empty());
        assert_eq!(r.elapsed_seconds, 0.0);
        assert_eq!(r.error_detail.as_deref(), Some("boom"));
    }
}
