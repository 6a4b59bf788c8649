//! Backend registry.
//!
//! Binds each [`BackendId`] to a concrete adapter at construction. Lookup is
//! by enum value, never by runtime name, so an unknown backend name is
//! unrepresentable.

use crate::backend::Adapter;
use crate::backends;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::types::{BackendDescriptor, BackendId};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Mapping from backend id to its bound adapter.
pub struct BackendRegistry {
    adapters: BTreeMap<BackendId, Adapter>,
}

impl BackendRegistry {
    /// Create an empty registry. Callers bind adapters with [`register`].
    ///
    /// [`register`]: BackendRegistry::register
    pub fn new() -> Self {
        Self {
            adapters: BTreeMap::new(),
        }
    }

    /// Build a registry with every production backend bound.
    ///
    /// The remote backend is bound even when its API key is absent; the
    /// missing key surfaces as a per-backend auth failure at extraction time
    /// rather than hiding the backend from selection controls.
    pub fn with_defaults(config: &BenchConfig) -> Result<Self> {
        let mut registry = Self::new();

        registry.register(
            BackendId::PdfiumText,
            Adapter::PerPage(Arc::new(backends::PdfiumTextBackend::new()?)),
        );
        registry.register(
            BackendId::PdfiumMarkdown,
            Adapter::PerPage(Arc::new(backends::PdfiumMarkdownBackend::new()?)),
        );
        registry.register(
            BackendId::LopdfText,
            Adapter::PerPage(Arc::new(backends::LopdfTextBackend::new())),
        );
        registry.register(
            BackendId::OcrPage,
            Adapter::PerPage(Arc::new(backends::OcrPageBackend::new(&config.ocr)?)),
        );
        registry.register(
            BackendId::OcrDocument,
            Adapter::WholeDocument(Arc::new(backends::OcrDocumentBackend::new(&config.ocr)?)),
        );
        registry.register(
            BackendId::RemoteParse,
            Adapter::WholeDocument(Arc::new(backends::RemoteParseBackend::new(&config.remote)?)),
        );

        Ok(registry)
    }

    /// Bind `adapter` to `id`, replacing any previous binding.
    ///
    /// The adapter's shape must agree with the id's static granularity.
    pub fn register(&mut self, id: BackendId, adapter: Adapter) {
        debug_assert_eq!(
            adapter.granularity(),
            id.granularity(),
            "adapter shape disagrees with the declared granularity of {id}"
        );
        self.adapters.insert(id, adapter);
    }

    /// Look up the adapter bound to `id`.
    pub fn get(&self, id: BackendId) -> Option<&Adapter> {
        self.adapters.get(&id)
    }

    /// Ids with a bound adapter, in presentation order.
    pub fn ids(&self) -> Vec<BackendId> {
        self.adapters.keys().copied().collect()
    }

    /// Descriptors for every bound backend, for selection controls.
    pub fn descriptors(&self) -> Vec<BackendDescriptor> {
        self.adapters.keys().map(|id| id.descriptor()).collect()
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
