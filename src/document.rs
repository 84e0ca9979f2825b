//! Structural validation of a raw catalog document.
//!
//! The document must be a JSON object with exactly two members,
//! `technologies` and `categories`, both objects. The layout is described by
//! `schema/catalog_document.schema.json`, which is embedded at build time and
//! compiled with `jsonschema` once per process. Entry-level shapes are left to
//! the category resolver and the fingerprint normalizer.

use crate::error::LoadError;
use jsonschema::JSONSchema;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

const DOCUMENT_SCHEMA: &str = include_str!("../schema/catalog_document.schema.json");

/// The two sections of a structurally valid catalog document.
#[derive(Debug)]
pub struct SourceDocument {
    technologies: Map<String, Value>,
    categories: Map<String, Value>,
}

impl SourceDocument {
    /// Parse and validate raw bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Validate an already-parsed document.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        validate_layout(&value)?;

        let Value::Object(mut root) = value else {
            return Err(LoadError::structure("catalog document must be an object"));
        };
        let technologies = take_section(&mut root, "technologies")?;
        let categories = take_section(&mut root, "categories")?;
        debug!(
            technologies = technologies.len(),
            categories = categories.len(),
            "catalog document passed structural validation"
        );
        Ok(Self {
            technologies,
            categories,
        })
    }

    pub fn technologies(&self) -> &Map<String, Value> {
        &self.technologies
    }

    pub fn categories(&self) -> &Map<String, Value> {
        &self.categories
    }
}

fn take_section(
    root: &mut Map<String, Value>,
    name: &str,
) -> Result<Map<String, Value>, LoadError> {
    match root.remove(name) {
        Some(Value::Object(section)) => Ok(section),
        Some(_) => Err(LoadError::structure(format!("'{name}' must be an object"))),
        None => Err(LoadError::structure(format!("missing '{name}' section"))),
    }
}

/// The embedded document schema, compiled on first use.
fn document_schema() -> Result<&'static JSONSchema, LoadError> {
    static COMPILED: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    COMPILED
        .get_or_init(compile_document_schema)
        .as_ref()
        .map_err(|err| LoadError::Schema(err.clone()))
}

fn compile_document_schema() -> Result<JSONSchema, String> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA)
        .map_err(|err| format!("parsing embedded document schema: {err}"))?;
    JSONSchema::compile(&schema)
        .map_err(|err| format!("compiling embedded document schema: {err}"))
}

fn validate_layout(document: &Value) -> Result<(), LoadError> {
    let compiled = document_schema()?;
    if let Err(errors) = compiled.validate(document) {
        let details = errors
            .map(|err| {
                let path = err.instance_path.to_string();
                if path.is_empty() {
                    err.to_string()
                } else {
                    format!("{path}: {err}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n");
        return Err(LoadError::Structure(details));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_two_object_sections() {
        let doc = SourceDocument::from_value(json!({
            "technologies": {"Acme": {}},
            "categories": {"1": {"name": "CMS"}}
        }))
        .unwrap();
        assert_eq!(doc.technologies().len(), 1);
        assert_eq!(doc.categories().len(), 1);
    }

    #[test]
    fn accepts_empty_sections() {
        let doc = SourceDocument::parse(br#"{"technologies": {}, "categories": {}}"#).unwrap();
        assert!(doc.technologies().is_empty());
        assert!(doc.categories().is_empty());
    }

    #[test]
    fn rejects_invalid_json() {
        let err = SourceDocument::parse(b"{\"technologies\": ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn rejects_missing_sections() {
        let err = SourceDocument::from_value(json!({"technologies": {}})).unwrap_err();
        assert!(matches!(err, LoadError::Structure(_)));
        assert!(err.to_string().contains("categories"), "{err}");
    }

    #[test]
    fn rejects_non_object_sections_and_roots() {
        let err = SourceDocument::from_value(json!({
            "technologies": [],
            "categories": {}
        }))
        .unwrap_err();
        assert!(matches!(err, LoadError::Structure(_)));
        assert!(err.to_string().contains("/technologies"), "{err}");

        assert!(matches!(
            SourceDocument::from_value(json!([1, 2])).unwrap_err(),
            LoadError::Structure(_)
        ));
    }

    #[test]
    fn rejects_extra_top_level_members() {
        let err = SourceDocument::from_value(json!({
            "technologies": {},
            "categories": {},
            "version": 6
        }))
        .unwrap_err();
        assert!(matches!(err, LoadError::Structure(_)));
    }

    #[test]
    fn embedded_schema_compiles_once() {
        let first = document_schema().unwrap();
        let second = document_schema().unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
