//! Benchmark configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default character cap for text produced by per-page backends.
pub const DEFAULT_MAX_PAGE_CHARS: usize = 230_000;
/// Default character cap for per-page text derived from whole-document backends.
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 300_000;

/// OCR settings for the Tesseract-based backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Tesseract language pair; the default pairs a source script with Latin.
    pub language: String,
    /// Rasterization DPI for single-page OCR calls.
    pub page_dpi: i32,
    /// Rasterization DPI when OCR-ing every page of a document in one call.
    pub document_dpi: i32,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "heb+eng".to_string(),
            page_dpi: 300,
            document_dpi: 200,
        }
    }
}

/// Settings for the cloud extraction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Endpoint receiving the document upload.
    pub endpoint: String,
    /// Environment variable holding the API key. Read at adapter
    /// construction, never stored in config files.
    pub api_key_env: String,
    /// HTTP timeout in seconds for the whole-document extraction call.
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cloud.llamaindex.ai/api/parsing/upload".to_string(),
            api_key_env: "PDFBENCH_REMOTE_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

impl RemoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Character cap for per-page backend output.
    pub max_page_chars: usize,
    /// Character cap per page for whole-document backend output.
    pub max_document_chars: usize,
    pub ocr: OcrSettings,
    pub remote: RemoteSettings,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            max_page_chars: DEFAULT_MAX_PAGE_CHARS,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
            ocr: OcrSettings::default(),
            remote: RemoteSettings::default(),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: BenchConfig =
            toml::from_str(&raw).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if any value is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_chars == 0 {
            return Err(Error::Config("max_page_chars must be > 0".to_string()));
        }
        if self.max_document_chars == 0 {
            return Err(Error::Config("max_document_chars must be > 0".to_string()));
        }
        if self.ocr.language.trim().is_empty() {
            return Err(Error::Config("ocr.language must not be empty".to_string()));
        }
        if !(72..=1200).contains(&self.ocr.page_dpi) {
            return Err(Error::Config(format!(
                "ocr.page_dpi must be 72-1200, got {}",
                self.ocr.page_dpi
            )));
        }
        if !(72..=1200).contains(&self.ocr.document_dpi) {
            return Err(Error::Config(format!(
                "ocr.document_dpi must be 72-1200, got {}",
                self.ocr.document_dpi
            )));
        }
        if self.remote.endpoint.trim().is_empty() {
            return Err(Error::Config("remote.endpoint must not be empty".to_string()));
        }
        if self.remote.timeout_secs == 0 {
            return Err(Error::Config("remote.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }
}
