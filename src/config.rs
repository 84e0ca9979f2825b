//! Normalization policy for a catalog load.
//!
//! Both knobs exist because the upstream schema carries quirks that a caller
//! must opt into or out of explicitly: the `\;` meta annotation embedded in
//! rule strings, and the old loader's habit of writing `implies` into the
//! `excludes` slot. Defaults come from `NormalizeOptions::default()`;
//! `from_env` layers `FINGERPRINT_CATALOG_*` overrides on top.

use anyhow::{Result, bail};
use std::env;

/// Env var selecting the meta-annotation policy (`strip` or `keep`).
pub const META_POLICY_ENV: &str = "FINGERPRINT_CATALOG_META";
/// Env var selecting the `implies` routing (`implies` or `legacy-excludes`).
pub const IMPLIES_ROUTING_ENV: &str = "FINGERPRINT_CATALOG_IMPLIES";
/// Env var naming the default source document for the CLI.
pub const SOURCE_PATH_ENV: &str = "FINGERPRINT_CATALOG_SOURCE";

/// Separator between a rule string and its trailing meta annotation.
pub const META_SEPARATOR: &str = "\\;";

/// What to do with the `\;`-delimited suffix of decoded strings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MetaPolicy {
    /// Cut everything from the first `\;` onwards.
    #[default]
    Strip,
    /// Leave strings exactly as the source wrote them.
    Keep,
}

impl MetaPolicy {
    /// Apply the policy to one decoded string.
    pub fn apply(self, value: &str) -> String {
        match self {
            MetaPolicy::Strip => match value.find(META_SEPARATOR) {
                Some(pos) => value[..pos].to_string(),
                None => value.to_string(),
            },
            MetaPolicy::Keep => value.to_string(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaPolicy::Strip => "strip",
            MetaPolicy::Keep => "keep",
        }
    }

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "strip" => Ok(MetaPolicy::Strip),
            "keep" => Ok(MetaPolicy::Keep),
            other => bail!("unknown meta policy '{other}' (expected strip|keep)"),
        }
    }
}

/// Where the decoded `implies` value lands on the fingerprint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImpliesRouting {
    /// `implies` fills `Fingerprint::implies`.
    #[default]
    Implies,
    /// `implies` overwrites `Fingerprint::excludes`, reproducing catalogs
    /// produced by the older loader.
    LegacyExcludesAlias,
}

impl ImpliesRouting {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpliesRouting::Implies => "implies",
            ImpliesRouting::LegacyExcludesAlias => "legacy-excludes",
        }
    }

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "implies" => Ok(ImpliesRouting::Implies),
            "legacy-excludes" => Ok(ImpliesRouting::LegacyExcludesAlias),
            other => bail!("unknown implies routing '{other}' (expected implies|legacy-excludes)"),
        }
    }
}

/// Options threaded through every decode of a single load.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizeOptions {
    pub meta: MetaPolicy,
    pub implies: ImpliesRouting,
}

impl NormalizeOptions {
    /// Defaults overridden by `FINGERPRINT_CATALOG_META` and
    /// `FINGERPRINT_CATALOG_IMPLIES`. Empty values are ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut options = NormalizeOptions::default();
        if let Some(raw) = non_empty(lookup(META_POLICY_ENV)) {
            options.meta = MetaPolicy::from_str(&raw)?;
        }
        if let Some(raw) = non_empty(lookup(IMPLIES_ROUTING_ENV)) {
            options.implies = ImpliesRouting::from_str(&raw)?;
        }
        Ok(options)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
