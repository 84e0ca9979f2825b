//! Fingerprint normalizer.
//!
//! Turns one raw technology entry into a `Fingerprint`: recognized keys are
//! decoded with the shape their `FieldKey` declares, `cats` is resolved
//! through the category table, and unknown keys are skipped. Any failure is
//! fatal for the whole load and names the technology and field involved.

use crate::catalog::{CategoryId, CategoryTable, FieldKey, Fingerprint};
use crate::config::{ImpliesRouting, NormalizeOptions};
use crate::error::LoadError;
use crate::field::{FieldValue, ShapeMismatch, decode_field, json_kind};
use serde_json::{Map, Value};
use tracing::trace;

const CATEGORY_IDS_LABEL: &str = "array of integer category ids";

/// Normalize every entry of the `technologies` section.
pub fn normalize_technologies(
    section: &Map<String, Value>,
    categories: &CategoryTable,
    options: &NormalizeOptions,
) -> Result<Vec<Fingerprint>, LoadError> {
    section
        .iter()
        .map(|(name, raw)| normalize_fingerprint(name, raw, categories, options))
        .collect()
}

/// Normalize one `(name, raw entry)` pair.
pub fn normalize_fingerprint(
    name: &str,
    raw: &Value,
    categories: &CategoryTable,
    options: &NormalizeOptions,
) -> Result<Fingerprint, LoadError> {
    let Value::Object(entry) = raw else {
        return Err(LoadError::structure(format!(
            "technology '{name}' must be an object, found {}",
            json_kind(raw)
        )));
    };

    // Visit keys in FieldKey order so the legacy implies routing overwrites
    // excludes no matter how the source map is ordered.
    let mut fields: Vec<(FieldKey, &Value)> = Vec::with_capacity(entry.len());
    for (key, value) in entry {
        match FieldKey::from_str(key) {
            Some(field) => fields.push((field, value)),
            None => trace!(
                technology = name,
                key = key.as_str(),
                "ignoring unrecognized key"
            ),
        }
    }
    fields.sort_by_key(|(field, _)| *field);

    let mut fp = Fingerprint::named(name);
    for (field, value) in fields {
        let Some(shape) = field.shape() else {
            fp.category_ids = decode_category_ids(name, value)?;
            fp.categories = fp
                .category_ids
                .iter()
                .map(|id| categories.resolve(name, *id).map(|c| c.name.clone()))
                .collect::<Result<_, _>>()?;
            continue;
        };
        let decoded = decode_field(value, shape, options.meta)
            .map_err(|mismatch| shape_error(name, field, mismatch))?;
        assign(&mut fp, field, decoded, options.implies);
    }
    Ok(fp)
}

fn assign(fp: &mut Fingerprint, field: FieldKey, value: FieldValue, implies: ImpliesRouting) {
    match field {
        // Resolved against the category table before dispatch.
        FieldKey::Cats => {}
        FieldKey::CertIssuer => fp.cert_issuer = value.into_sequence().unwrap_or_default(),
        FieldKey::Cookies => fp.cookies = value.into_map().unwrap_or_default(),
        FieldKey::Cpe => fp.cpe = value.into_scalar(),
        FieldKey::Css => fp.css = value.into_sequence().unwrap_or_default(),
        FieldKey::Excludes => fp.excludes = value.into_sequence().unwrap_or_default(),
        FieldKey::Headers => fp.headers = value.into_map().unwrap_or_default(),
        FieldKey::Html => fp.html = value.into_sequence().unwrap_or_default(),
        FieldKey::Icon => fp.icon = value.into_scalar(),
        FieldKey::Implies => match implies {
            ImpliesRouting::Implies => fp.implies = value.into_sequence().unwrap_or_default(),
            ImpliesRouting::LegacyExcludesAlias => {
                fp.excludes = value.into_sequence().unwrap_or_default()
            }
        },
        FieldKey::Js => fp.js = value.into_map().unwrap_or_default(),
        FieldKey::Meta => fp.meta = value.into_map().unwrap_or_default(),
        FieldKey::Robots => fp.robots = value.into_sequence().unwrap_or_default(),
        FieldKey::Scripts => fp.scripts = value.into_sequence().unwrap_or_default(),
        FieldKey::Url => fp.url = value.into_scalar(),
        FieldKey::Website => fp.website = value.into_scalar(),
    }
}

fn decode_category_ids(technology: &str, raw: &Value) -> Result<Vec<CategoryId>, LoadError> {
    let Value::Array(items) = raw else {
        return Err(LoadError::FieldShape {
            technology: technology.to_string(),
            field: FieldKey::Cats.as_str().to_string(),
            expected: CATEGORY_IDS_LABEL,
            found: json_kind(raw),
        });
    };
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(CategoryId)
                .ok_or_else(|| LoadError::FieldShape {
                    technology: technology.to_string(),
                    field: FieldKey::Cats.as_str().to_string(),
                    expected: CATEGORY_IDS_LABEL,
                    found: "array with a non-integer element",
                })
        })
        .collect()
}

fn shape_error(technology: &str, field: FieldKey, mismatch: ShapeMismatch) -> LoadError {
    LoadError::FieldShape {
        technology: technology.to_string(),
        field: field.as_str().to_string(),
        expected: mismatch.expected,
        found: mismatch.found,
    }
}
