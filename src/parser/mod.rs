//! PDF parsing, delegated to lopdf.

mod document;
mod encoding;

pub use document::PdfDocument;
pub use encoding::{decode_text_string, parse_pdf_date};
