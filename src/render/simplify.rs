//! Projection of PDF objects into JSON values.
//!
//! [`simplify`] keeps indirect references as `"N:G"` strings.
//! [`simplify_resolved`] replaces them with the objects they point to.

use std::collections::HashSet;

use lopdf::{Object, ObjectId};
use serde_json::{Map, Number, Value};

use crate::address::ObjectAddress;
use crate::parser::{decode_text_string, PdfDocument};

const MAX_RESOLVE_DEPTH: usize = 64;

/// What to emit in place of an indirect reference.
trait References {
    fn reference(&mut self, id: ObjectId) -> Value;
}

struct Preserve;

impl References for Preserve {
    fn reference(&mut self, id: ObjectId) -> Value {
        Value::String(ObjectAddress::from(id).to_string())
    }
}

struct Resolve<'a> {
    doc: &'a PdfDocument,
    visiting: HashSet<ObjectId>,
}

impl References for Resolve<'_> {
    fn reference(&mut self, id: ObjectId) -> Value {
        let address = ObjectAddress::from(id);
        if self.visiting.len() >= MAX_RESOLVE_DEPTH {
            log::warn!("reference chain through {} too deep, emitting null", address);
            return Value::Null;
        }
        if !self.visiting.insert(id) {
            log::warn!("reference cycle through {}, emitting null", address);
            return Value::Null;
        }
        let doc = self.doc;
        let value = match doc.resolve(address) {
            Ok(target) => project(target, self),
            Err(_) => {
                log::warn!("dangling reference to {}, emitting null", address);
                Value::Null
            }
        };
        self.visiting.remove(&id);
        value
    }
}

/// JSON projection of `object`, with references rendered as `"N:G"`.
pub fn simplify(object: &Object) -> Value {
    project(object, &mut Preserve)
}

/// JSON projection of `object`, with every reference resolved recursively.
///
/// References to missing objects, and references back into an object that is
/// still being resolved, become `null`.
pub fn simplify_resolved(doc: &PdfDocument, object: &Object) -> Value {
    let mut resolve = Resolve {
        doc,
        visiting: HashSet::new(),
    };
    project(object, &mut resolve)
}

fn project<R: References>(object: &Object, refs: &mut R) -> Value {
    match object {
        Object::Null => Value::Null,
        Object::Boolean(b) => Value::Bool(*b),
        Object::Integer(i) => Value::from(*i),
        Object::Real(r) => real(*r),
        Object::Name(name) => Value::String(String::from_utf8_lossy(name).into_owned()),
        Object::String(bytes, _) => Value::String(decode_text_string(bytes)),
        Object::Array(items) => Value::Array(items.iter().map(|o| project(o, refs)).collect()),
        Object::Dictionary(dict) => dictionary(dict, refs),
        Object::Stream(stream) => {
            let mut map = Map::new();
            map.insert("dictionary".to_string(), dictionary(&stream.dict, refs));
            map.insert("length".to_string(), Value::from(stream.content.len()));
            Value::Object(map)
        }
        Object::Reference(id) => refs.reference(*id),
    }
}

fn dictionary<R: References>(dict: &lopdf::Dictionary, refs: &mut R) -> Value {
    let map = dict
        .iter()
        .map(|(key, value)| {
            (
                String::from_utf8_lossy(key).into_owned(),
                project(value, refs),
            )
        })
        .collect::<Map<String, Value>>();
    Value::Object(map)
}

/// Go through the shortest decimal form so `0.1` stays `0.1`.
fn real(r: f32) -> Value {
    r.to_string()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream, StringFormat};
    use serde_json::json;

    #[test]
    fn test_simplify_scalars() {
        assert_eq!(simplify(&Object::Null), Value::Null);
        assert_eq!(simplify(&Object::Boolean(true)), json!(true));
        assert_eq!(simplify(&Object::Integer(-4)), json!(-4));
        assert_eq!(simplify(&Object::Real(0.1)), json!(0.1));
        assert_eq!(simplify(&Object::Real(f32::NAN)), Value::Null);
        assert_eq!(simplify(&Object::Name(b"Catalog".to_vec())), json!("Catalog"));
        assert_eq!(
            simplify(&Object::String(b"Hello".to_vec(), StringFormat::Literal)),
            json!("Hello")
        );
    }

    #[test]
    fn test_simplify_keeps_references() {
        let object = Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference((3, 0)),
            "Annots" => vec![Object::Reference((10, 2)), Object::Integer(1)],
        });
        assert_eq!(
            simplify(&object),
            json!({ "Type": "Page", "Parent": "3:0", "Annots": ["10:2", 1] })
        );
    }

    #[test]
    fn test_simplify_stream() {
        let stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, vec![0u8; 42]);
        let value = simplify(&Object::Stream(stream));
        assert_eq!(value["length"], json!(42));
        assert_eq!(value["dictionary"]["Filter"], json!("FlateDecode"));
    }
}
