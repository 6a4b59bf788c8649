//! Benchmark orchestration.

use crate::document::Document;
use crate::error::{Error, Result};
use crate::types::{BackendId, BackendResult};
use std::collections::BTreeMap;

/// Run every requested backend against one page of `document`.
///
/// Backend selection has set semantics: duplicate ids collapse to one entry
/// and one extraction. The output always carries exactly one entry per
/// distinct requested backend, in presentation order; a backend that is
/// unregistered or fails is reported as a failed [`BackendResult`], never
/// skipped, so rows stay comparable across runs. Only an out-of-range page
/// index aborts the whole run.
pub fn run_benchmark(
    document: &Document,
    page_index: usize,
    backends: &[BackendId],
) -> Result<BTreeMap<BackendId, BackendResult>> {
    if page_index >= document.page_count() {
        return Err(Error::PageOutOfRange {
            page_index,
            page_count: document.page_count(),
        });
    }

    let mut results = BTreeMap::new();
    for &backend in backends {
        if results.contains_key(&backend) {
            continue;
        }
        tracing::debug!(%backend, page_index, "benchmarking backend");
        let result = match document.get_text(backend, page_index) {
            Ok(result) => result,
            // Out-of-range was checked above, so an Err here means the
            // backend has no adapter bound. Report it as a failed row.
            Err(e) => {
                tracing::warn!(%backend, error = %e, "backend unavailable");
                BackendResult::failure(backend, page_index, e.to_string())
            }
        };
        results.insert(backend, result);
    }
    Ok(results)
}
