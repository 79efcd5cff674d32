//! # pdfi
//!
//! Content extraction from PDF documents: plain text, a sectioned "paper"
//! view, trailer metadata, the cross-reference table, and individual objects
//! by address.
//!
//! Parsing itself is done by [`lopdf`]; this crate supplies the byte source it
//! reads from, the object address syntax, the per-object rendering rules and
//! the command dispatch used by the `pdfi` binary.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfi::{ObjectAddress, PdfDocument, FileSource};
//!
//! fn main() -> pdfi::Result<()> {
//!     let source = FileSource::open("paper.pdf")?;
//!     let doc = PdfDocument::load(&source)?;
//!
//!     let catalog = doc.resolve("1:0".parse::<ObjectAddress>()?)?;
//!     println!("{}", pdfi::render::simplify(catalog));
//!     Ok(())
//! }
//! ```

pub mod address;
pub mod command;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use address::ObjectAddress;
pub use command::{usage, Command, DispatchFlags, Router, RouterConfig};
pub use detect::{detect_format, detect_format_from_bytes, PdfFormat};
pub use error::{Error, Result};
pub use extract::{Extraction, ObjectOutcome};
pub use model::{
    CrossReference, CrossReferenceTable, ObjectLocation, Paper, Section, TrailerProjection,
    XrefKind,
};
pub use parser::PdfDocument;
pub use render::{JsonFormat, Rendered};
pub use source::{FileSource, MemorySource, Source, SourceReader};

use std::path::Path;

/// Open and parse a PDF file.
///
/// The file handle is released as soon as parsing finishes.
///
/// # Example
///
/// ```no_run
/// let doc = pdfi::open_document("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<PdfDocument> {
    let mut source = FileSource::open(path)?;
    let doc = PdfDocument::load(&source);
    source.close()?;
    doc
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<PdfDocument> {
    PdfDocument::from_bytes(data)
}

/// Extract plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// let text = pdfi::extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    extract::extract_text(&open_document(path)?)
}

/// Extract the paper structure from a PDF file.
pub fn extract_paper<P: AsRef<Path>>(path: P) -> Result<Paper> {
    extract::extract_paper(&open_document(path)?)
}

/// Read the trailer projection of a PDF file.
pub fn extract_metadata<P: AsRef<Path>>(path: P) -> Result<TrailerProjection> {
    extract::extract_metadata(&open_document(path)?)
}

/// Read the cross-reference table of a PDF file.
pub fn extract_xref<P: AsRef<Path>>(path: P) -> Result<CrossReferenceTable> {
    Ok(open_document(path)?.cross_references())
}
