//! Extraction pipelines, one per command.

mod metadata;
mod objects;
mod paper;
mod text;

pub use metadata::extract_metadata;
pub use objects::{extract_objects, ObjectOutcome};
pub use paper::{extract_paper, PaperExtractor};
pub use text::extract_text;

use crate::address::ObjectAddress;
use crate::command::Command;
use crate::error::Result;
use crate::model::{CrossReferenceTable, Paper, TrailerProjection};
use crate::parser::PdfDocument;

/// Output of a pipeline.
#[derive(Debug)]
pub enum Extraction {
    Text(String),
    Paper(Paper),
    Metadata(TrailerProjection),
    Xref(CrossReferenceTable),
    Objects(Vec<ObjectOutcome>),
}

/// Run the pipeline for `command` against a loaded document.
///
/// `addresses` is only read by [`Command::Objects`].
pub fn run(
    command: Command,
    doc: &PdfDocument,
    addresses: &[ObjectAddress],
    decode: bool,
) -> Result<Extraction> {
    let extraction = match command {
        Command::Text => Extraction::Text(extract_text(doc)?),
        Command::Paper => Extraction::Paper(extract_paper(doc)?),
        Command::Metadata => Extraction::Metadata(extract_metadata(doc)?),
        Command::Xref => Extraction::Xref(doc.cross_references()),
        Command::Objects => Extraction::Objects(extract_objects(doc, addresses, decode)),
    };
    Ok(extraction)
}
