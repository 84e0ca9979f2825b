use crate::field::FieldShape;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric category identifier.
///
/// The source document keys the categories table with decimal strings; the id
/// is parsed once at load time and `Display` renders it back to that form.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl CategoryId {
    /// Parse a categories-table key such as `"12"`.
    ///
    /// Only plain ASCII digits are accepted; signs, whitespace and empty keys
    /// are rejected.
    pub fn parse_key(raw: &str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        raw.parse().ok().map(CategoryId)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recognized keys of a technology entry.
///
/// Keys outside this set are ignored so newer catalogs keep loading.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum FieldKey {
    Cats,
    CertIssuer,
    Cookies,
    Cpe,
    Css,
    Excludes,
    Headers,
    Html,
    Icon,
    Implies,
    Js,
    Meta,
    Robots,
    Scripts,
    Url,
    Website,
}

impl FieldKey {
    pub const ALL: [FieldKey; 16] = [
        FieldKey::Cats,
        FieldKey::CertIssuer,
        FieldKey::Cookies,
        FieldKey::Cpe,
        FieldKey::Css,
        FieldKey::Excludes,
        FieldKey::Headers,
        FieldKey::Html,
        FieldKey::Icon,
        FieldKey::Implies,
        FieldKey::Js,
        FieldKey::Meta,
        FieldKey::Robots,
        FieldKey::Scripts,
        FieldKey::Url,
        FieldKey::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Cats => "cats",
            FieldKey::CertIssuer => "certIssuer",
            FieldKey::Cookies => "cookies",
            FieldKey::Cpe => "cpe",
            FieldKey::Css => "css",
            FieldKey::Excludes => "excludes",
            FieldKey::Headers => "headers",
            FieldKey::Html => "html",
            FieldKey::Icon => "icon",
            FieldKey::Implies => "implies",
            FieldKey::Js => "js",
            FieldKey::Meta => "meta",
            FieldKey::Robots => "robots",
            FieldKey::Scripts => "scripts",
            FieldKey::Url => "url",
            FieldKey::Website => "website",
        }
    }

    pub fn from_str(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }

    /// Shape the field decoder coerces this key into.
    ///
    /// `cats` has no decoder shape: it holds integer category references that
    /// the normalizer resolves against the categories table.
    pub fn shape(&self) -> Option<FieldShape> {
        match self {
            FieldKey::Cats => None,
            FieldKey::Cpe | FieldKey::Icon | FieldKey::Url | FieldKey::Website => {
                Some(FieldShape::Scalar)
            }
            FieldKey::CertIssuer
            | FieldKey::Css
            | FieldKey::Excludes
            | FieldKey::Html
            | FieldKey::Implies
            | FieldKey::Robots
            | FieldKey::Scripts => Some(FieldShape::Sequence),
            FieldKey::Cookies | FieldKey::Headers | FieldKey::Js | FieldKey::Meta => {
                Some(FieldShape::Map)
            }
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
