//! Immutable, name-indexed catalog built from one source document.
//!
//! Fingerprints are sorted by name once, at construction, and never mutated
//! afterwards; lookups are binary searches over that sorted view, so a built
//! catalog can be shared across threads and read concurrently.

use crate::catalog::{Category, CategoryId, CategoryTable, Fingerprint};
use crate::config::NormalizeOptions;
use crate::document::SourceDocument;
use crate::error::{LoadError, NotFound};
use crate::normalizer::normalize_technologies;
use tracing::info;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Normalized fingerprints plus the categories they were resolved against.
pub struct Catalog {
    fingerprints: Vec<Fingerprint>,
    categories: CategoryTable,
}

impl Catalog {
    /// Load a catalog from raw document bytes with default options.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        Self::from_slice_with(bytes, &NormalizeOptions::default())
    }

    /// Load a catalog from raw document bytes.
    ///
    /// Categories are decoded first, then every technology is normalized
    /// against them. Any failure aborts the load; no partial catalog is
    /// returned.
    pub fn from_slice_with(bytes: &[u8], options: &NormalizeOptions) -> Result<Self, LoadError> {
        let document = SourceDocument::parse(bytes)?;
        let categories = CategoryTable::from_section(document.categories())?;
        let fingerprints = normalize_technologies(document.technologies(), &categories, options)?;
        let catalog = Self::from_parts(fingerprints, categories);
        info!(
            fingerprints = catalog.len(),
            categories = catalog.categories.len(),
            meta = options.meta.as_str(),
            implies = options.implies.as_str(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Build the sorted view over already-normalized parts.
    pub fn from_parts(mut fingerprints: Vec<Fingerprint>, categories: CategoryTable) -> Self {
        fingerprints.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            fingerprints,
            categories,
        }
    }

    /// Resolve a fingerprint by exact name.
    ///
    /// Returns `None` for names that merely share a prefix with an entry.
    pub fn lookup(&self, name: &str) -> Option<&Fingerprint> {
        let idx = self
            .fingerprints
            .partition_point(|fp| fp.name.as_str() < name);
        self.fingerprints.get(idx).filter(|fp| fp.name == name)
    }

    /// Like `lookup`, but reports a miss as a typed error.
    pub fn require(&self, name: &str) -> Result<&Fingerprint, NotFound> {
        self.lookup(name).ok_or_else(|| NotFound {
            name: name.to_string(),
        })
    }

    /// All fingerprints in ascending name order.
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    /// Iterates fingerprint names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fingerprints.iter().map(|fp| fp.name.as_str())
    }

    /// Fingerprints resolved into the named category, in name order.
    pub fn with_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Fingerprint> {
        self.fingerprints
            .iter()
            .filter(move |fp| fp.in_category(category))
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}
