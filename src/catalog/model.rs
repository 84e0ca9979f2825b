//! Normalized catalog records.
//!
//! These are the types application code reads after a load. Field names
//! serialize with the source document's camelCase spelling, and absent or
//! empty rule fields are omitted so serialized output never carries null
//! placeholders.

use crate::catalog::identity::CategoryId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One entry of the categories table.
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub priority: i64,
}

/// Raw categories-table value as written in the source.
///
/// Extra members (such as `groups`) are ignored.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RawCategory {
    pub name: String,
    #[serde(default)]
    pub priority: i64,
}

impl RawCategory {
    pub(crate) fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            priority: self.priority,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Detection rules for one technology, with categories resolved to names.
pub struct Fingerprint {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(rename = "cats", skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<CategoryId>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cert_issuer: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpe: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub css: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excludes: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub html: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implies: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub js: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub robots: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scripts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Fingerprint {
    /// A fingerprint with no rules and no categories.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when the fingerprint was resolved into the named category.
    pub fn in_category(&self, category: &str) -> bool {
        self.categories.iter().any(|name| name == category)
    }
}
