//! Loads a fingerprint catalog and prints entries by name.
//!
//! Reads the document from `--file`, `--stdin`, or `FINGERPRINT_CATALOG_SOURCE`,
//! normalizes it with the configured policy, and writes JSON to stdout. Logs
//! go to stderr (`RUST_LOG` controls verbosity) so stdout stays parseable.
//! Exit status is 1 when the catalog cannot be acquired or loaded and 2 when
//! any requested name is missing.

use anyhow::{Context, Result, bail};
use clap::Parser;
use fingerprint_catalog::{Catalog, ImpliesRouting, InputSource, MetaPolicy, NormalizeOptions};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const EXIT_LOAD_FAILED: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;

/// Look up technologies in a fingerprint catalog.
#[derive(Parser, Debug)]
#[command(name = "fingerprint-lookup", version, about, long_about = None)]
struct Cli {
    /// Catalog document to load (defaults to $FINGERPRINT_CATALOG_SOURCE)
    #[arg(long, conflicts_with = "stdin")]
    file: Option<PathBuf>,

    /// Read the catalog document from stdin
    #[arg(long)]
    stdin: bool,

    /// Keep `\;` meta annotations in rule strings
    #[arg(long)]
    keep_meta: bool,

    /// Write `implies` into `excludes`, as older loaders did
    #[arg(long)]
    legacy_implies_alias: bool,

    /// Print every technology name, one per line
    #[arg(long, conflicts_with_all = ["categories", "in_category", "names"])]
    list: bool,

    /// Print the categories table as JSON
    #[arg(long, conflicts_with_all = ["in_category", "names"])]
    categories: bool,

    /// Print the names of technologies in a category, one per line
    #[arg(long, value_name = "CATEGORY", conflicts_with = "names")]
    in_category: Option<String>,

    /// Technology names to print
    names: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(EXIT_LOAD_FAILED);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let source = match (&cli.file, cli.stdin) {
        (Some(path), _) => InputSource::File(path.clone()),
        (None, true) => InputSource::Stdin,
        (None, false) => InputSource::from_env()
            .context("no catalog source; use --file, --stdin or FINGERPRINT_CATALOG_SOURCE")?,
    };
    let options = resolve_options(&cli)?;

    debug!(source = %source.describe(), "reading catalog");
    let bytes = source.read()?;
    let catalog = Catalog::from_slice_with(&bytes, &options)
        .with_context(|| format!("loading catalog {}", source.describe()))?;

    if cli.list {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(0);
    }
    if cli.categories {
        let categories: Vec<_> = catalog.categories().iter().collect();
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(0);
    }
    if let Some(category) = cli.in_category.as_deref() {
        for fp in catalog.with_category(category) {
            println!("{}", fp.name);
        }
        return Ok(0);
    }
    if cli.names.is_empty() {
        bail!("no technology names given (or use --list / --categories / --in-category)");
    }

    print_fingerprints(&catalog, &cli.names)
}

fn resolve_options(cli: &Cli) -> Result<NormalizeOptions> {
    let mut options = NormalizeOptions::from_env()?;
    if cli.keep_meta {
        options.meta = MetaPolicy::Keep;
    }
    if cli.legacy_implies_alias {
        options.implies = ImpliesRouting::LegacyExcludesAlias;
    }
    Ok(options)
}

fn print_fingerprints(catalog: &Catalog, names: &[String]) -> Result<i32> {
    let mut found = Vec::with_capacity(names.len());
    let mut missing = 0;
    for name in names {
        match catalog.require(name) {
            Ok(fp) => found.push(fp),
            Err(err) => {
                eprintln!("{err}");
                missing += 1;
            }
        }
    }

    let rendered = match found.as_slice() {
        [] => None,
        [single] if names.len() == 1 => Some(serde_json::to_string_pretty(single)?),
        many => Some(serde_json::to_string_pretty(many)?),
    };
    if let Some(text) = rendered {
        println!("{text}");
    }

    Ok(if missing > 0 { EXIT_NOT_FOUND } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_policy() {
        let cli = Cli::parse_from([
            "fingerprint-lookup",
            "--keep-meta",
            "--legacy-implies-alias",
            "Acme",
        ]);
        let options = resolve_options(&cli).unwrap();
        assert_eq!(options.meta, MetaPolicy::Keep);
        assert_eq!(options.implies, ImpliesRouting::LegacyExcludesAlias);
    }

    #[test]
    fn file_and_stdin_are_exclusive() {
        assert!(
            Cli::try_parse_from(["fingerprint-lookup", "--file", "a.json", "--stdin"]).is_err()
        );
    }
}
