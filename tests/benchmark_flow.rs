//! End-to-end behavior of the document handle and benchmark runner, exercised
//! with instrumented stand-in backends so no real PDF library is touched.

use parking_lot::Mutex;
use pdfbench::{
    run_benchmark, Adapter, BackendId, BackendRegistry, BenchConfig, Document, DocumentExtractor, Error,
    PageExtractor,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Per-page stand-in that counts invocations and returns a fixed payload.
struct CountingPage {
    calls: Arc<AtomicUsize>,
    payload: String,
}

impl PageExtractor for CountingPage {
    fn extract_page(&self, _path: &Path, page_index: usize) -> pdfbench::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} page {page_index}", self.payload))
    }
}

/// Per-page stand-in that always fails.
struct FailingPage {
    calls: Arc<AtomicUsize>,
}

impl PageExtractor for FailingPage {
    fn extract_page(&self, _path: &Path, _page_index: usize) -> pdfbench::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::extraction("lopdf-text", "synthetic decode failure"))
    }
}

/// Whole-document stand-in producing one fixed text per page.
struct CountingDocument {
    calls: Arc<AtomicUsize>,
    pages: Vec<String>,
    delay: Option<std::time::Duration>,
}

impl DocumentExtractor for CountingDocument {
    fn extract_all_pages(&self, _path: &Path) -> pdfbench::Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(self.pages.clone())
    }
}

fn counting_page(calls: &Arc<AtomicUsize>, payload: &str) -> Adapter {
    Adapter::PerPage(Arc::new(CountingPage {
        calls: Arc::clone(calls),
        payload: payload.to_string(),
    }))
}

fn counting_document(calls: &Arc<AtomicUsize>, pages: Vec<String>) -> Adapter {
    Adapter::WholeDocument(Arc::new(CountingDocument {
        calls: Arc::clone(calls),
        pages,
        delay: None,
    }))
}

/// A document handle over a throwaway file with a declared page count.
fn document_with(registry: BackendRegistry, page_count: usize, config: &BenchConfig) -> (Document, NamedTempFile) {
    let file = NamedTempFile::new().unwrap();
    let document = Document::with_page_count(file.path(), page_count, Arc::new(registry), config).unwrap();
    (document, file)
}

#[test]
fn per_page_results_are_memoized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&calls, "alpha"));

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 3, &config);

    let first = document.get_text(BackendId::PdfiumText, 1).unwrap();
    let second = document.get_text(BackendId::PdfiumText, 1).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
    assert!(first.succeeded);
    assert_eq!(first.text, "alpha page 1");
}

#[test]
fn distinct_pages_are_cached_independently() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&calls, "alpha"));

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 3, &config);

    document.get_text(BackendId::PdfiumText, 0).unwrap();
    document.get_text(BackendId::PdfiumText, 2).unwrap();
    document.get_text(BackendId::PdfiumText, 0).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn whole_document_backend_runs_once_and_fills_every_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::RemoteParse,
        counting_document(&calls, vec!["one".into(), "two".into(), "three".into()]),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 3, &config);

    let page2 = document.get_text(BackendId::RemoteParse, 2).unwrap();
    let page0 = document.get_text(BackendId::RemoteParse, 0).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "one invocation serves all pages");
    assert_eq!(page2.text, "three");
    assert_eq!(page0.text, "one");
    // Every page carries the cost of the single document extraction.
    assert_eq!(page0.elapsed_seconds, page2.elapsed_seconds);
}

#[test]
fn per_page_output_is_capped() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::PdfiumText,
        Adapter::PerPage(Arc::new(CountingPage {
            calls: Arc::clone(&calls),
            payload: "y".repeat(500_000),
        })),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 1, &config);

    let result = document.get_text(BackendId::PdfiumText, 0).unwrap();
    assert_eq!(result.text.chars().count(), 230_000);
}

#[test]
fn whole_document_output_is_capped_per_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::OcrDocument,
        counting_document(&calls, vec!["z".repeat(500_000), "short".into()]),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 2, &config);

    let long = document.get_text(BackendId::OcrDocument, 0).unwrap();
    let short = document.get_text(BackendId::OcrDocument, 1).unwrap();
    assert_eq!(long.text.chars().count(), 300_000);
    assert_eq!(short.text, "short");
}

#[test]
fn out_of_range_page_is_an_error_and_never_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&calls, "alpha"));

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 2, &config);

    let err = document.get_text(BackendId::PdfiumText, 2).unwrap_err();
    assert!(matches!(
        err,
        Error::PageOutOfRange {
            page_index: 2,
            page_count: 2
        }
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no adapter invocation for a bad index");

    // Valid requests still work afterwards.
    assert!(document.get_text(BackendId::PdfiumText, 1).unwrap().succeeded);
}

#[test]
fn failures_are_memoized_like_successes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::LopdfText,
        Adapter::PerPage(Arc::new(FailingPage {
            calls: Arc::clone(&calls),
        })),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 1, &config);

    let first = document.get_text(BackendId::LopdfText, 0).unwrap();
    let second = document.get_text(BackendId::LopdfText, 0).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1, "a known failure is not retried");
    assert!(!first.succeeded);
    assert!(first.text.is_empty());
    assert_eq!(first.elapsed_seconds, 0.0);
    assert!(first
        .error_detail
        .as_deref()
        .unwrap()
        .contains("synthetic decode failure"));
    assert_eq!(first, second);
}

#[test]
fn page_count_mismatch_fails_every_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::RemoteParse,
        counting_document(&calls, vec!["only one page".into()]),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 3, &config);

    for page_index in 0..3 {
        let result = document.get_text(BackendId::RemoteParse, page_index).unwrap();
        assert!(!result.succeeded);
        assert!(result.error_detail.as_deref().unwrap().contains("1 page(s)"));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_requests_share_one_whole_document_extraction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(
        BackendId::OcrDocument,
        Adapter::WholeDocument(Arc::new(CountingDocument {
            calls: Arc::clone(&calls),
            pages: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            delay: Some(std::time::Duration::from_millis(30)),
        })),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 4, &config);
    let document = Arc::new(document);

    let results = Mutex::new(Vec::new());
    std::thread::scope(|scope| {
        for page_index in 0..4 {
            let document = Arc::clone(&document);
            let results = &results;
            scope.spawn(move || {
                let result = document.get_text(BackendId::OcrDocument, page_index).unwrap();
                results.lock().push(result);
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1, "racing pages coalesce into one extraction");
    let results = results.into_inner();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.succeeded));
}

#[test]
fn runner_reports_one_row_per_distinct_backend() {
    let text_calls = Arc::new(AtomicUsize::new(0));
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let fail_calls = Arc::new(AtomicUsize::new(0));

    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&text_calls, "text"));
    registry.register(
        BackendId::OcrDocument,
        counting_document(&ocr_calls, vec!["ocr one".into(), "ocr two".into()]),
    );
    registry.register(
        BackendId::LopdfText,
        Adapter::PerPage(Arc::new(FailingPage {
            calls: Arc::clone(&fail_calls),
        })),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 2, &config);

    // Duplicates collapse; the unregistered remote backend still gets a row.
    let selection = [
        BackendId::PdfiumText,
        BackendId::PdfiumText,
        BackendId::LopdfText,
        BackendId::OcrDocument,
        BackendId::RemoteParse,
    ];
    let results = run_benchmark(&document, 1, &selection).unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(text_calls.load(Ordering::SeqCst), 1);
    assert_eq!(ocr_calls.load(Ordering::SeqCst), 1);

    assert!(results[&BackendId::PdfiumText].succeeded);
    assert_eq!(results[&BackendId::OcrDocument].text, "ocr two");
    assert!(!results[&BackendId::LopdfText].succeeded);

    let remote = &results[&BackendId::RemoteParse];
    assert!(!remote.succeeded);
    assert!(remote.error_detail.as_deref().unwrap().contains("not registered"));
}

#[test]
fn runner_rejects_out_of_range_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&calls, "alpha"));

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 1, &config);

    let err = run_benchmark(&document, 5, &[BackendId::PdfiumText]).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn backend_failure_does_not_poison_other_backends() {
    let good_calls = Arc::new(AtomicUsize::new(0));
    let bad_calls = Arc::new(AtomicUsize::new(0));

    let mut registry = BackendRegistry::new();
    registry.register(BackendId::PdfiumText, counting_page(&good_calls, "fine"));
    registry.register(
        BackendId::LopdfText,
        Adapter::PerPage(Arc::new(FailingPage {
            calls: Arc::clone(&bad_calls),
        })),
    );

    let config = BenchConfig::default();
    let (document, _file) = document_with(registry, 1, &config);

    let results = run_benchmark(&document, 0, &[BackendId::LopdfText, BackendId::PdfiumText]).unwrap();
    assert!(!results[&BackendId::LopdfText].succeeded);
    assert!(results[&BackendId::PdfiumText].succeeded);
    assert_eq!(results[&BackendId::PdfiumText].text, "fine page 0");
}

#[test]
fn document_handle_exposes_name_and_folder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quarterly-report.pdf");
    std::fs::write(&path, b"%PDF-1.4 stub").unwrap();

    let config = BenchConfig::default();
    let document = Document::with_page_count(&path, 5, Arc::new(BackendRegistry::new()), &config).unwrap();

    assert_eq!(document.name(), "quarterly-report");
    assert_eq!(document.folder(), dir.path());
    assert_eq!(document.page_count(), 5);
}

#[test]
fn missing_file_is_rejected_at_construction() {
    let config = BenchConfig::default();
    let err = Document::with_page_count(
        "/nonexistent/pdfbench/missing.pdf",
        1,
        Arc::new(BackendRegistry::new()),
        &config,
    )
    .unwrap_err();
    assert!(matches!(err, Error::DocumentOpen { .. }));
}
