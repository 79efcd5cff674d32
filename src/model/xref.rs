//! Cross-reference table projection.

use serde::Serialize;

/// How the cross-reference data was stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum XrefKind {
    /// Classic `xref` keyword table
    Table,
    /// Cross-reference stream (PDF 1.5+)
    Stream,
}

/// The complete cross-reference table, as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossReferenceTable {
    /// Storage kind
    pub kind: XrefKind,
    /// Declared table size (highest object number + 1)
    pub size: u32,
    /// Entries ordered by object number
    pub entries: Vec<CrossReference>,
}

/// One cross-reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReference {
    pub object_number: u32,
    pub generation_number: u16,
    pub in_use: bool,

    /// Byte offset of an uncompressed object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,

    /// Object stream holding a compressed object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_stream_object_number: Option<u32>,

    /// Index of a compressed object inside its object stream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_stream_index: Option<u16>,
}

impl CrossReference {
    /// Where the object lives, if the entry is in use.
    pub fn location(&self) -> Option<ObjectLocation> {
        if !self.in_use {
            return None;
        }
        match (
            self.offset,
            self.object_stream_object_number,
            self.object_stream_index,
        ) {
            (Some(offset), _, _) => Some(ObjectLocation::Offset(offset)),
            (None, Some(container), Some(index)) => {
                Some(ObjectLocation::InObjectStream { container, index })
            }
            _ => None,
        }
    }
}

/// Storage location of an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectLocation {
    /// Byte offset in the file
    Offset(u32),
    /// Compressed inside an object stream
    InObjectStream { container: u32, index: u16 },
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectLocation::Offset(offset) => write!(f, "offset={}", offset),
            ObjectLocation::InObjectStream { container, index } => {
                write!(f, "object_stream={} index={}", container, index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(object_number: u32, offset: u32) -> CrossReference {
        CrossReference {
            object_number,
            generation_number: 0,
            in_use: true,
            offset: Some(offset),
            object_stream_object_number: None,
            object_stream_index: None,
        }
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let json = serde_json::to_value(normal(1, 17)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "object_number": 1,
                "generation_number": 0,
                "in_use": true,
                "offset": 17
            })
        );
    }

    #[test]
    fn test_location() {
        assert_eq!(normal(1, 17).location(), Some(ObjectLocation::Offset(17)));

        let compressed = CrossReference {
            object_number: 5,
            generation_number: 0,
            in_use: true,
            offset: None,
            object_stream_object_number: Some(9),
            object_stream_index: Some(2),
        };
        let location = compressed.location().unwrap();
        assert_eq!(location.to_string(), "object_stream=9 index=2");

        let free = CrossReference {
            in_use: false,
            offset: None,
            ..normal(0, 0)
        };
        assert_eq!(free.location(), None);
    }

    #[test]
    fn test_table_serialization() {
        let table = CrossReferenceTable {
            kind: XrefKind::Table,
            size: 4,
            entries: vec![normal(1, 9), normal(2, 80), normal(3, 160)],
        };
        assert_eq!(serde_json::to_value(&table).unwrap()["entries"][1]["offset"], 80);
        assert_eq!(
            serde_json::to_value(&table).unwrap()["kind"],
            serde_json::json!("table")
        );
    }
}
