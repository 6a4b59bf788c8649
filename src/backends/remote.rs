//! Remote parsing service backend.
//!
//! Uploads the whole document to an HTTP parsing endpoint and receives the
//! per-page text back in one response. The API key is read from the
//! environment at construction; a missing key is reported as an auth failure
//! at extraction time so the backend still appears in selection controls.

use crate::backend::DocumentExtractor;
use crate::config::RemoteSettings;
use crate::error::{Error, RemoteErrorKind, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RemotePage {
    #[serde(default)]
    md: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteDocument {
    #[serde(default)]
    pages: Vec<RemotePage>,
}

impl RemotePage {
    /// Markdown rendition when the service produced one, plain text otherwise.
    fn into_text(self) -> String {
        self.md.or(self.text).unwrap_or_default()
    }
}

/// Whole-document backend over a remote parsing API.
pub struct RemoteParseBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl RemoteParseBackend {
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| Error::remote(RemoteErrorKind::Transport, format!("failed to build HTTP client: {e}")))?;

        let api_key = std::env::var(&settings.api_key_env).ok().filter(|k| !k.is_empty());
        if api_key.is_none() {
            tracing::debug!(env = %settings.api_key_env, "remote API key not set, backend will fail on use");
        }

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key,
            api_key_env: settings.api_key_env.clone(),
        })
    }

    fn classify_status(status: StatusCode) -> RemoteErrorKind {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteErrorKind::Auth,
            StatusCode::TOO_MANY_REQUESTS => RemoteErrorKind::RateLimit,
            _ => RemoteErrorKind::Protocol,
        }
    }
}

impl DocumentExtractor for RemoteParseBackend {
    fn extract_all_pages(&self, path: &Path) -> Result<Vec<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::remote(
                RemoteErrorKind::Auth,
                format!("API key not found in environment variable {}", self.api_key_env),
            )
        })?;

        let bytes = std::fs::read(path)?;
        tracing::debug!(endpoint = %self.endpoint, bytes = bytes.len(), "uploading document");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes)
            .send()
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    RemoteErrorKind::Timeout
                } else {
                    RemoteErrorKind::Transport
                };
                Error::remote(kind, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote(
                Self::classify_status(status),
                format!("service returned {status}: {}", body.trim()),
            ));
        }

        let document: RemoteDocument = response
            .json()
            .map_err(|e| Error::remote(RemoteErrorKind::Protocol, format!("malformed response body: {e}")))?;

        Ok(document.pages.into_iter().map(RemotePage::into_text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_prefers_markdown_over_text() {
        let page: RemotePage = serde_json::from_str(r##"{"md": "# Title", "text": "Title"}"##).unwrap();
        assert_eq!(page.into_text(), "# Title");
    }

    #[test]
    fn page_falls_back_to_plain_text() {
        let page: RemotePage = serde_json::from_str(r#"{"text": "body"}"#).unwrap();
        assert_eq!(page.into_text(), "body");
    }

    #[test]
    fn page_with_no_content_is_empty() {
        let page: RemotePage = serde_json::from_str("{}").unwrap();
        assert_eq!(page.into_text(), "");
    }

    #[test]
    fn document_without_pages_deserializes_empty() {
        let document: RemoteDocument = serde_json::from_str("{}").unwrap();
        assert!(document.pages.is_empty());
    }

    #[test]
    fn status_classification() {
        assert_eq!(
            RemoteParseBackend::classify_status(StatusCode::UNAUTHORIZED),
            RemoteErrorKind::Auth
        );
        assert_eq!(
            RemoteParseBackend::classify_status(StatusCode::FORBIDDEN),
            RemoteErrorKind::Auth
        );
        assert_eq!(
            RemoteParseBackend::classify_status(StatusCode::TOO_MANY_REQUESTS),
            RemoteErrorKind::RateLimit
        );
        assert_eq!(
            RemoteParseBackend::classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            RemoteErrorKind::Protocol
        );
    }
}
