#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const POLICY_ENV_VARS: &[&str] = &[
    "FINGERPRINT_CATALOG_META",
    "FINGERPRINT_CATALOG_IMPLIES",
    "FINGERPRINT_CATALOG_SOURCE",
];

/// Small but realistic catalog document used across the suite.
pub fn sample_document() -> Value {
    json!({
        "technologies": {
            "Acme CMS": {
                "cats": [1],
                "website": "https://acme.example/",
                "html": "<meta name=\"generator\" content=\"Acme CMS ([\\d.]+)\\;version:\\1",
                "implies": ["PHP", "MySQL"],
                "meta": {"generator": "^Acme CMS\\;confidence:50"},
                "description": "An example CMS."
            },
            "Acme": {
                "cats": [1, 9],
                "scripts": ["acme\\.js", "acme-loader\\.js"],
                "headers": {"X-Acme": ""}
            },
            "EdgeCo": {
                "cats": [9],
                "excludes": "Acme",
                "cookies": {"__edge": ""},
                "icon": "EdgeCo.svg"
            },
            "PHP": {
                "cats": [27],
                "headers": {"X-Powered-By": "^php/?([\\d.]+)?\\;version:\\1"},
                "cpe": "cpe:2.3:a:php:php:*:*:*:*:*:*:*:*"
            }
        },
        "categories": {
            "1": {"name": "CMS", "priority": 1},
            "9": {"name": "CDN", "priority": 9, "groups": [19]},
            "27": {"name": "Programming languages", "priority": 5}
        }
    })
}

pub fn to_bytes(document: &Value) -> Vec<u8> {
    serde_json::to_vec(document).expect("fixture serializes")
}

/// Write `document` as `technologies.json` under `dir`.
pub fn write_document(dir: &Path, document: &Value) -> Result<PathBuf> {
    let path = dir.join("technologies.json");
    std::fs::write(&path, to_bytes(document))
        .with_context(|| format!("writing fixture {}", path.display()))?;
    Ok(path)
}

pub fn lookup_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fingerprint-lookup"))
}

/// A `fingerprint-lookup` command with policy env vars cleared.
pub fn lookup_command() -> Command {
    let mut cmd = Command::new(lookup_binary());
    for var in POLICY_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

/// Run without requiring success; callers assert on the exit status.
pub fn run_command_unchecked(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run command: {:?}", cmd))
}
