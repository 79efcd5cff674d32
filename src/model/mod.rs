//! Output model types.
//!
//! Every extraction command produces one of these values; all of them are
//! serializable to JSON.

mod paper;
mod trailer;
mod xref;

pub use paper::{Paper, Section};
pub use trailer::TrailerProjection;
pub use xref::{CrossReference, CrossReferenceTable, ObjectLocation, XrefKind};
