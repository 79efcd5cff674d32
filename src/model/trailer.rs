//! Trailer projection printed by the `metadata` command.

use serde::Serialize;
use serde_json::Value;

use crate::address::ObjectAddress;

/// The parts of the trailer worth showing: size, catalog and info.
///
/// `info` is fully resolved: it never contains an indirect reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailerProjection {
    #[serde(rename = "Size")]
    pub size: i64,

    #[serde(rename = "Root")]
    pub root: ObjectAddress,

    #[serde(rename = "Info")]
    pub info: Option<Value>,
}
