//! Error types for catalog loading and lookup.
//!
//! Every load-time failure is fatal: a `LoadError` means no catalog was
//! produced. A lookup miss is not a load failure and gets its own type.

use crate::catalog::CategoryId;
use thiserror::Error;

/// Fatal failure while turning a source document into a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The buffer is not a JSON document at all.
    #[error("catalog document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document, a section, or an entry is not the expected container
    /// shape.
    #[error("malformed catalog document: {0}")]
    Structure(String),

    /// The embedded document schema could not be loaded or compiled.
    #[error("document schema unavailable: {0}")]
    Schema(String),

    /// A technology field does not match any of its permitted shapes.
    #[error("technology '{technology}' field '{field}': expected {expected}, found {found}")]
    FieldShape {
        technology: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A technology references a category id absent from the categories table.
    #[error("technology '{technology}' references unknown category id {id}")]
    UnknownCategory { technology: String, id: CategoryId },
}

impl LoadError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        LoadError::Structure(message.into())
    }
}

/// No fingerprint in the catalog carries the requested name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no fingerprint named '{name}'")]
pub struct NotFound {
    pub name: String,
}
