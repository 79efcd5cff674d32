//! Extraction of individual objects by address.

use crate::address::ObjectAddress;
use crate::error::Result;
use crate::model::ObjectLocation;
use crate::parser::PdfDocument;
use crate::render::{render_object, Rendered};

/// The result of looking up and rendering one address.
#[derive(Debug)]
pub struct ObjectOutcome {
    /// Requested address
    pub address: ObjectAddress,
    /// Where the cross-reference table places it
    pub location: Option<ObjectLocation>,
    /// Rendered object, or why it could not be rendered
    pub result: Result<Rendered>,
}

impl ObjectOutcome {
    /// Diagnostic line written before the payload, e.g. `14:0 [offset=1033]`.
    pub fn diagnostic(&self) -> String {
        match self.location {
            Some(location) => format!("{} [{}]", self.address, location),
            None => format!("{} [not in xref]", self.address),
        }
    }
}

/// Resolve and render each address, in the order given.
///
/// A missing or undecodable object fails only its own entry.
pub fn extract_objects(
    doc: &PdfDocument,
    addresses: &[ObjectAddress],
    decode: bool,
) -> Vec<ObjectOutcome> {
    addresses
        .iter()
        .map(|&address| ObjectOutcome {
            address,
            location: doc.location_of(address),
            result: doc
                .resolve(address)
                .and_then(|object| render_object(doc, address, object, decode)),
        })
        .collect()
}
