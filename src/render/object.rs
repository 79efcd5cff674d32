//! Per-object rendering for the `objects` command.

use std::io::Write;

use lopdf::Object;
use serde_json::Value;

use crate::address::ObjectAddress;
use crate::error::Result;
use crate::parser::PdfDocument;

use super::json::{to_json, JsonFormat};
use super::simplify::simplify;

/// A rendered object, ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// Decoded stream bytes, written as-is
    Binary(Vec<u8>),
    /// Simplified object graph
    Json(Value),
}

impl Rendered {
    /// Write the payload. Binary content goes out untouched; JSON is
    /// followed by a newline.
    pub fn write_to(&self, out: &mut dyn Write, format: JsonFormat) -> Result<()> {
        match self {
            Rendered::Binary(bytes) => out.write_all(bytes)?,
            Rendered::Json(value) => writeln!(out, "{}", to_json(value, format)?)?,
        }
        Ok(())
    }
}

/// Whether `object` is a stream whose payload `--decode` should emit.
///
/// Embedded file streams are attachments rather than content and are always
/// shown as JSON.
pub fn is_content_stream(object: &Object) -> bool {
    match object {
        Object::Stream(stream) => !matches!(
            stream.dict.get(b"Type").and_then(Object::as_name),
            Ok(b"EmbeddedFile")
        ),
        _ => false,
    }
}

/// Render one resolved object.
pub fn render_object(
    doc: &PdfDocument,
    address: ObjectAddress,
    object: &Object,
    decode: bool,
) -> Result<Rendered> {
    match object {
        Object::Stream(stream) if decode && is_content_stream(object) => {
            doc.decode_stream(address, stream).map(Rendered::Binary)
        }
        _ => Ok(Rendered::Json(simplify(object))),
    }
}
