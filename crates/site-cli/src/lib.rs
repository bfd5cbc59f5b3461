//! # site-cli — Authoring Tool for Site Configuration Documents
//!
//! Provides the `site` command-line interface for working on a local
//! site configuration JSON document before it is uploaded.
//!
//! ## Subcommands
//!
//! - `site validate` — Run the validating loader and report every failure.
//! - `site themes` — Show the resolved theme set and active theme.
//! - `site menu` — Show the navigation menu derived from the pages.
//! - `site messages` — Look up translations with locale fallback.
//!
//! ```bash
//! site validate demos/site-config.json
//! site themes demos/site-config.json --select Dark
//! site messages demos/site-config.json --locale fr menu.home hero.title
//! ```
//!
//! ## Exit Codes
//!
//! `0` on success, `1` when the document is rejected (or a lookup misses),
//! `2` on operational errors such as an unreadable file.

pub mod menu;
pub mod messages;
pub mod themes;
pub mod validate;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use site_core::SiteConfig;
use site_schema::{LoadError, Loader, SchemaRegistry};

/// Exit code for a rejected document or failed lookup.
pub const EXIT_REJECTED: u8 = 1;

/// Read and validate the document at `path`.
///
/// The outer `Result` carries I/O and schema-compilation failures; the
/// inner one carries the loader's verdict on the document itself.
pub fn load_document(path: &Path) -> Result<std::result::Result<SiteConfig, LoadError>> {
    let registry = SchemaRegistry::new().context("failed to compile site configuration schemas")?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read site config");
    Ok(Loader::new(&registry).load_str(&text))
}

/// Print a rejected document's failures, one per line.
pub fn report_rejection(out: &mut dyn Write, path: &Path, err: &LoadError) -> Result<()> {
    writeln!(out, "FAIL: {} ({})", path.display(), err.kind())?;
    match err.violations() {
        Some(violations) => {
            for violation in violations {
                writeln!(out, "  {}: {}", violation.path, violation.message)?;
            }
            writeln!(out, "{} error(s)", violations.len())?;
        }
        None => writeln!(out, "  {err}")?,
    }
    Ok(())
}

/// Load `path`, or report the rejection and yield the exit code.
pub fn load_or_report(out: &mut dyn Write, path: &Path) -> Result<std::result::Result<SiteConfig, u8>> {
    match load_document(path)? {
        Ok(config) => Ok(Ok(config)),
        Err(err) => {
            report_rejection(out, path, &err)?;
            Ok(Err(EXIT_REJECTED))
        }
    }
}
