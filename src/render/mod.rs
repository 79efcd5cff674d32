//! Rendering of extraction results: object simplification, the binary/JSON
//! decision for single objects, and JSON formatting.

mod json;
mod object;
mod simplify;

pub use json::{to_json, JsonFormat};
pub use object::{is_content_stream, render_object, Rendered};
pub use simplify::{simplify, simplify_resolved};
