//! Document handle with memoized extraction results.
//!
//! A [`Document`] owns the page count, the per-backend result cache, and the
//! truncation limits. Extraction goes through [`Document::get_text`], which
//! guarantees at-most-once adapter invocation per cache key even under
//! concurrent callers: the first caller computes, racing callers block on a
//! condvar until the result lands in the cache.

use crate::backend::{truncate_chars, Adapter};
use crate::config::BenchConfig;
use crate::error::{Error, Result};
use crate::registry::BackendRegistry;
use crate::timing::measure;
use crate::types::{BackendId, BackendResult};
use ahash::AHashMap;
use parking_lot::{Condvar, Mutex};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Unit of in-flight computation. Per-page backends fill one cache key per
/// call; whole-document backends fill every page from a single call and are
/// keyed by backend alone so concurrent page requests coalesce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FlightKey {
    Page(BackendId, usize),
    Document(BackendId),
}

#[derive(Default)]
struct CacheState {
    entries: AHashMap<(BackendId, usize), BackendResult>,
    in_flight: HashSet<FlightKey>,
}

/// An open PDF under benchmark.
pub struct Document {
    name: String,
    folder: PathBuf,
    path: PathBuf,
    page_count: usize,
    max_page_chars: usize,
    max_document_chars: usize,
    registry: Arc<BackendRegistry>,
    state: Mutex<CacheState>,
    completed: Condvar,
}

impl Document {
    /// Open `path`, resolving its page count with the structure resolver.
    ///
    /// Fails when the file is missing or not a readable PDF; backends are not
    /// invoked here.
    pub fn open(path: impl AsRef<Path>, registry: Arc<BackendRegistry>, config: &BenchConfig) -> Result<Self> {
        let path = path.as_ref();
        let page_count = crate::backends::resolve_page_count(path)?;
        Self::with_page_count(path, page_count, registry, config)
    }

    /// Build a handle for a document whose page count the caller already
    /// knows. The file must exist; its structure is not re-verified.
    pub fn with_page_count(
        path: impl AsRef<Path>,
        page_count: usize,
        registry: Arc<BackendRegistry>,
        config: &BenchConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DocumentOpen {
                path: path.to_path_buf(),
                message: "file does not exist".to_string(),
            });
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();

        Ok(Self {
            name,
            folder,
            path: path.to_path_buf(),
            page_count,
            max_page_chars: config.max_page_chars,
            max_document_chars: config.max_document_chars,
            registry,
            state: Mutex::new(CacheState::default()),
            completed: Condvar::new(),
        })
    }

    /// File name without the `.pdf` extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory containing the document.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Full path to the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Extract `page_index` with `backend`, memoized.
    ///
    /// The first call per cache key invokes the adapter under the timing
    /// wrapper; later calls (and concurrent racers) get the cached
    /// [`BackendResult`], failures included. Only two conditions surface as
    /// `Err`, and neither is cached: a page index outside the document, and a
    /// backend id with no adapter bound.
    pub fn get_text(&self, backend: BackendId, page_index: usize) -> Result<BackendResult> {
        if page_index >= self.page_count {
            return Err(Error::PageOutOfRange {
                page_index,
                page_count: self.page_count,
            });
        }
        let adapter = self
            .registry
            .get(backend)
            .ok_or(Error::BackendUnavailable(backend))?;

        let key = match adapter {
            Adapter::PerPage(_) => FlightKey::Page(backend, page_index),
            Adapter::WholeDocument(_) => FlightKey::Document(backend),
        };

        {
            let mut state = self.state.lock();
            loop {
                if let Some(result) = state.entries.get(&(backend, page_index)) {
                    return Ok(result.clone());
                }
                if state.in_flight.insert(key) {
                    break;
                }
                self.completed.wait(&mut state);
            }
        }

        tracing::debug!(%backend, page_index, document = %self.name, "running extraction");
        let computed = match adapter {
            Adapter::PerPage(extractor) => {
                let result = match measure(|| extractor.extract_page(&self.path, page_index)) {
                    Ok((text, elapsed)) => {
                        BackendResult::success(backend, page_index, truncate_chars(text, self.max_page_chars), elapsed)
                    }
                    Err(e) => {
                        tracing::warn!(%backend, page_index, error = %e, "extraction failed");
                        BackendResult::failure(backend, page_index, e.to_string())
                    }
                };
                vec![result]
            }
            Adapter::WholeDocument(extractor) => self.compute_whole_document(backend, extractor.as_ref()),
        };

        let mut state = self.state.lock();
        for result in computed {
            state.entries.insert((result.backend, result.page_index), result);
        }
        state.in_flight.remove(&key);
        let result = state
            .entries
            .get(&(backend, page_index))
            .cloned()
            .ok_or_else(|| Error::extraction(backend.as_str(), "extraction produced no entry for the requested page"));
        drop(state);
        self.completed.notify_all();
        result
    }

    /// Run a whole-document adapter and fan the outcome out to every page.
    ///
    /// The single measured duration is recorded on each page's entry: the
    /// document was extracted once, and that is the cost any page access paid.
    /// A page-count mismatch poisons every page with the same failure rather
    /// than guessing at an alignment.
    fn compute_whole_document(&self, backend: BackendId, extractor: &dyn crate::backend::DocumentExtractor) -> Vec<BackendResult> {
        match measure(|| extractor.extract_all_pages(&self.path)) {
            Ok((pages, elapsed)) if pages.len() == self.page_count => pages
                .into_iter()
                .enumerate()
                .map(|(index, text)| {
                    BackendResult::success(backend, index, truncate_chars(text, self.max_document_chars), elapsed)
                })
                .collect(),
            Ok((pages, _)) => {
                let detail = format!(
                    "backend returned {} page(s) for a document with {}",
                    pages.len(),
                    self.page_count
                );
                tracing::warn!(%backend, document = %self.name, "{detail}");
                (0..self.page_count)
                    .map(|index| BackendResult::failure(backend, index, detail.clone()))
                    .collect()
            }
            Err(e) => {
                tracing::warn!(%backend, document = %self.name, error = %e, "whole-document extraction failed");
                let detail = e.to_string();
                (0..self.page_count)
                    .map(|index| BackendResult::failure(backend, index, detail.clone()))
                    .collect()
            }
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("page_count", &self.page_count)
            .finish_non_exhaustive()
    }
}
