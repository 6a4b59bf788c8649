//! Error types for pdfbench.
//!
//! Only [`Error::DocumentOpen`] aborts an operation outright: with no document
//! there is nothing to benchmark. Every backend-level failure is caught by the
//! document handle, recorded as a failed `BackendResult`, and memoized so the
//! same backend is not retried on a document it is known to fail on.

use crate::types::BackendId;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfbench operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure classification for the cloud extraction backend.
///
/// Preserved in `error_detail` so a presentation layer can distinguish
/// "rate limited, try later" from "bad credentials".
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// Request exceeded the configured HTTP timeout.
    Timeout,
    /// Missing or rejected credentials (401/403).
    Auth,
    /// Service rate limit hit (429).
    RateLimit,
    /// Connection or transport-level failure.
    Transport,
    /// Unexpected status or malformed response body.
    Protocol,
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RemoteErrorKind::Timeout => "timeout",
            RemoteErrorKind::Auth => "auth",
            RemoteErrorKind::RateLimit => "rate-limit",
            RemoteErrorKind::Transport => "transport",
            RemoteErrorKind::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while opening documents or running backends.
#[derive(Error, Debug)]
pub enum Error {
    /// Path missing, unreadable, or not a valid PDF. Fatal for the document.
    #[error("Failed to open document {path}: {message}")]
    DocumentOpen { path: PathBuf, message: String },

    /// Requested page index outside `[0, page_count)`. Never cached.
    #[error("Page index {page_index} out of range for document with {page_count} page(s)")]
    PageOutOfRange { page_index: usize, page_count: usize },

    /// Requested backend id has no adapter bound in the registry.
    #[error("Backend '{0}' is not registered")]
    BackendUnavailable(BackendId),

    /// A backend's extraction call failed (corrupt content, unsupported
    /// feature, decoding failure).
    #[error("Backend '{backend}' failed: {message}")]
    Extraction { backend: &'static str, message: String },

    /// OCR or page rasterization failed outright. An empty rasterizer result
    /// for a valid page is not an error; it yields an empty extraction.
    #[error("OCR error: {message}")]
    Ocr { message: String },

    /// Network/auth/rate-limit failure from the cloud backend.
    #[error("Remote extraction failed ({kind}): {message}")]
    Remote { kind: RemoteErrorKind, message: String },

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an [`Error::Extraction`] for the given backend.
    pub fn extraction<S: Into<String>>(backend: &'static str, message: S) -> Self {
        Error::Extraction {
            backend,
            message: message.into(),
        }
    }

    /// Create an [`Error::Ocr`].
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Error::Ocr { message: message.into() }
    }

    /// Create an [`Error::Remote`] with the given failure kind.
    pub fn remote<S: Into<String>>(kind: RemoteErrorKind, message: S) -> Self {
        Error::Remote {
            kind,
            message: message.into(),
        }
    }
}
