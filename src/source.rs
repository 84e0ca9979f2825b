//! Document acquisition.
//!
//! Loading only ever sees bytes. This module produces those bytes from a
//! local file or stdin and reports failures as acquisition errors with the
//! path attached; they are never folded into `LoadError`. The crate does no
//! network I/O: callers that fetch the upstream catalog themselves should use
//! `UPSTREAM_SOURCE_URL` and hand the body to `Catalog::from_slice_with`.

use crate::catalog::Catalog;
use crate::config::{NormalizeOptions, SOURCE_PATH_ENV};
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Fixed upstream location of the catalog document.
pub const UPSTREAM_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/AliasIO/Wappalyzer/master/src/technologies.json";

/// Where the raw document comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// `FINGERPRINT_CATALOG_SOURCE` as a file source, when set and non-empty.
    pub fn from_env() -> Option<Self> {
        env::var(SOURCE_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| InputSource::File(PathBuf::from(v)))
    }

    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            InputSource::File(path) => read_source(path),
            InputSource::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .context("reading catalog from stdin")?;
                Ok(buf)
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

/// Read a catalog document from disk.
///
/// Any readable path works, including FIFOs such as `<(curl ...)`.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading catalog source {}", path.display()))
}

/// Read and load a catalog file in one step.
pub fn load_catalog_from_path(path: &Path, options: &NormalizeOptions) -> Result<Catalog> {
    let bytes = read_source(path)?;
    let catalog = Catalog::from_slice_with(&bytes, options)
        .with_context(|| format!("loading catalog {}", path.display()))?;
    Ok(catalog)
}
