//! pdfbench: a benchmarking engine for PDF text extraction backends.
//!
//! The engine runs a set of extraction backends against the same document
//! page, times each invocation, and memoizes results so repeated comparisons
//! never re-invoke a backend. Backends come in two granularities: per-page
//! backends extract one page per call, whole-document backends extract every
//! page in a single call whose cost is shared by all page accesses.
//!
//! ```no_run
//! use pdfbench::{BackendId, BackendRegistry, BenchConfig, Document, run_benchmark};
//! use std::sync::Arc;
//!
//! # fn main() -> pdfbench::Result<()> {
//! let config = BenchConfig::default();
//! let registry = Arc::new(BackendRegistry::with_defaults(&config)?);
//! let document = Document::open("report.pdf", registry, &config)?;
//!
//! let results = run_benchmark(&document, 0, &[BackendId::PdfiumText, BackendId::LopdfText])?;
//! for (backend, result) in &results {
//!     println!("{backend}: {:.3}s, {} chars", result.elapsed_seconds, result.text.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod config;
pub mod document;
pub mod error;
pub mod registry;
pub mod runner;
pub mod timing;
pub mod types;

pub use backend::{Adapter, DocumentExtractor, PageExtractor};
pub use config::{BenchConfig, OcrSettings, RemoteSettings};
pub use document::Document;
pub use error::{Error, RemoteErrorKind, Result};
pub use registry::BackendRegistry;
pub use runner::run_benchmark;
pub use timing::measure;
pub use types::{BackendDescriptor, BackendId, BackendResult, Granularity};
