//! Technology-fingerprint catalog loader.
//!
//! The crate turns a fingerprint source document (a `technologies` table
//! keyed by product name plus a `categories` table keyed by decimal id) into
//! an immutable `Catalog` that can be queried by product name. Loading is one
//! synchronous pass over an in-memory buffer:
//!
//! 1. `document` checks the top-level layout against the embedded schema.
//! 2. `catalog::categories` decodes the id → category table.
//! 3. `normalizer` coerces each technology's fields through the
//!    shape-polymorphic decoder in `field` and resolves `cats` ids to names.
//! 4. `catalog::index` sorts the result by name for binary-search lookup.
//!
//! Every load failure is fatal and typed (`LoadError`); a lookup miss is an
//! ordinary `None`. Getting the bytes in the first place is the caller's job;
//! `source` has small helpers for files and stdin.

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod field;
pub mod normalizer;
pub mod source;

pub use catalog::{Catalog, Category, CategoryId, CategoryTable, FieldKey, Fingerprint};
pub use config::{ImpliesRouting, MetaPolicy, NormalizeOptions};
pub use document::SourceDocument;
pub use error::{LoadError, NotFound};
pub use field::{FieldShape, FieldValue, ShapeMismatch, decode_field};
pub use normalizer::{normalize_fingerprint, normalize_technologies};
pub use source::{InputSource, UPSTREAM_SOURCE_URL, load_catalog_from_path, read_source};

