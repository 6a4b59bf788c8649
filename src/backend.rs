//! Backend adapter contract.
//!
//! Backends come in two deliberately distinct capability shapes. Per-page
//! backends accept a page index and pay a fixed cost per invocation;
//! whole-document backends extract every page in one call, amortizing that
//! cost across the document. The distinction materially affects timing
//! semantics, so the contract preserves it instead of forcing a single
//! signature.

use crate::error::Result;
use crate::types::Granularity;
use std::path::Path;
use std::sync::Arc;

/// A backend that extracts one page at a time.
///
/// `page_index` is 0-based and has already been range-checked against the
/// document's page count by the caller.
pub trait PageExtractor: Send + Sync {
    fn extract_page(&self, path: &Path, page_index: usize) -> Result<String>;
}

/// A backend that extracts the whole document in a single call.
///
/// Returns one text per page, in page order. The caller compares the length
/// against the document's page count and treats a mismatch as a failure.
pub trait DocumentExtractor: Send + Sync {
    fn extract_all_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// A registered backend: one of the two capability shapes.
#[derive(Clone)]
pub enum Adapter {
    PerPage(Arc<dyn PageExtractor>),
    WholeDocument(Arc<dyn DocumentExtractor>),
}

impl Adapter {
    pub fn granularity(&self) -> Granularity {
        match self {
            Adapter::PerPage(_) => Granularity::PerPage,
            Adapter::WholeDocument(_) => Granularity::WholeDocument,
        }
    }
}

/// Truncate `text` to at most `max_chars` characters.
///
/// A safety bound against pathological documents, not a semantic limit.
/// Operates on character count, so the cut never lands inside a UTF-8
/// sequence.
pub(crate) fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = text;
            truncated.truncate(byte_index);
            truncated
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_shorter_text_is_identity() {
        assert_eq!(truncate_chars("hello".to_string(), 10), "hello");
        assert_eq!(truncate_chars("hello".to_string(), 5), "hello");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        // Hebrew letters are two bytes each in UTF-8.
        let text = "שלום עולם".to_string();
        let truncated = truncate_chars(text, 4);
        assert_eq!(truncated, "שלום");
    }

    #[test]
    fn truncate_to_zero() {
        assert_eq!(truncate_chars("abc".to_string(), 0), "");
    }

    #[test]
    fn truncate_long_ascii() {
        let text = "x".repeat(500_000);
        let truncated = truncate_chars(text, 230_000);
        assert_eq!(truncated.chars().count(), 230_000);
    }
}
