//! Category resolver: the id → category table used while normalizing
//! technologies.

use crate::catalog::identity::CategoryId;
use crate::catalog::model::{Category, RawCategory};
use crate::error::LoadError;
use crate::field::json_kind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Categories keyed by their decoded numeric id.
pub struct CategoryTable {
    by_id: BTreeMap<CategoryId, Category>,
}

impl CategoryTable {
    /// Decode every entry of the `categories` section.
    ///
    /// Keys must be decimal integers and values must decode into
    /// `{name, priority}`; the first failure aborts the load.
    pub fn from_section(section: &Map<String, Value>) -> Result<Self, LoadError> {
        let mut by_id = BTreeMap::new();
        for (key, raw) in section {
            let id = CategoryId::parse_key(key).ok_or_else(|| {
                LoadError::structure(format!("category key '{key}' is not a decimal integer"))
            })?;
            // Struct deserialization would also accept the `[name, priority]`
            // sequence form.
            if !raw.is_object() {
                return Err(LoadError::structure(format!(
                    "category {key} must be an object, found {}",
                    json_kind(raw)
                )));
            }
            let decoded: RawCategory = serde_json::from_value(raw.clone()).map_err(|err| {
                LoadError::structure(format!("category {key} is malformed: {err}"))
            })?;
            // "01" and "1" decode to the same id.
            if by_id.insert(id, decoded.into_category(id)).is_some() {
                return Err(LoadError::structure(format!(
                    "category id {id} is declared more than once"
                )));
            }
        }
        debug!(count = by_id.len(), "decoded categories table");
        Ok(Self { by_id })
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id)
    }

    /// Resolve a reference made by `technology`, failing on a miss.
    pub fn resolve(&self, technology: &str, id: CategoryId) -> Result<&Category, LoadError> {
        self.get(id).ok_or_else(|| LoadError::UnknownCategory {
            technology: technology.to_string(),
            id,
        })
    }

    /// Find a category by its display name.
    pub fn by_name(&self, name: &str) -> Option<&Category> {
        self.by_id.values().find(|category| category.name == name)
    }

    /// Iterates categories in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
