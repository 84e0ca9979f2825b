//! Catalog wiring.
//!
//! `Catalog` is the entry point: it loads a source document, resolves
//! categories through `CategoryTable`, and keeps the normalized fingerprints
//! in a name-sorted view for lookups. The record types live in `model`;
//! identifiers and the recognized field keys live in `identity`.

pub mod categories;
pub mod identity;
pub mod index;
pub mod model;

pub use categories::CategoryTable;
pub use identity::{CategoryId, FieldKey};
pub use index::Catalog;
pub use model::{Category, Fingerprint};
