//! Trailer metadata extraction.

use lopdf::Object;

use crate::address::ObjectAddress;
use crate::error::{Error, Result};
use crate::model::TrailerProjection;
use crate::parser::PdfDocument;
use crate::render::simplify_resolved;

/// Project the trailer: `Size`, `Root` and the fully resolved `Info`.
pub fn extract_metadata(doc: &PdfDocument) -> Result<TrailerProjection> {
    let trailer = doc.trailer();

    let root = trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map(ObjectAddress::from)
        .map_err(|_| Error::Parse("trailer has no Root reference".to_string()))?;

    let size = match trailer.get(b"Size") {
        Ok(Object::Integer(size)) => *size,
        _ => {
            let size = doc.cross_references().size;
            log::warn!("trailer has no integer Size, using xref size {}", size);
            i64::from(size)
        }
    };

    let info = trailer
        .get(b"Info")
        .ok()
        .map(|info| simplify_resolved(doc, info));

    Ok(TrailerProjection { size, root, info })
}
