//! Concrete extraction backends.

mod lopdf;
mod markdown;
mod ocr;
mod pdfium;
mod remote;

pub use self::lopdf::LopdfTextBackend;
pub use self::markdown::{text_to_markdown, PdfiumMarkdownBackend};
pub use self::ocr::{OcrDocumentBackend, OcrPageBackend};
pub use self::pdfium::PdfiumTextBackend;
pub use self::remote::RemoteParseBackend;

pub(crate) use self::pdfium::resolve_page_count;
