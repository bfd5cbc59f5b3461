//! # Validate Subcommand
//!
//! Runs the full validating loader over a document and prints every
//! failure with its field path, or a one-line summary on success.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::{load_document, report_rejection, EXIT_REJECTED};

/// Arguments for the `site validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Site configuration document to validate.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document is accepted, 1 when rejected.
pub fn run_validate(args: &ValidateArgs, out: &mut dyn Write) -> Result<u8> {
    let verdict = load_document(&args.path)?;

    if args.json {
        let report = match &verdict {
            Ok(_) => json!({ "ok": true, "errors": [] }),
            Err(err) => json!({
                "ok": false,
                "code": err.kind().as_str(),
                "errors": err.violations().map_or_else(
                    || {
                        json!([{
                            "path": "",
                            "message": err.to_string(),
                            "kind": err.kind().as_str(),
                        }])
                    },
                    |v| json!(v),
                ),
            }),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(if verdict.is_ok() { 0 } else { EXIT_REJECTED });
    }

    match verdict {
        Ok(config) => {
            tracing::info!(path = %args.path.display(), "site config accepted");
            writeln!(
                out,
                "OK: {} ({} page(s), {} section(s), {} theme(s))",
                args.path.display(),
                config.pages.len(),
                config.section_count(),
                config.themes.len()
            )?;
            Ok(0)
        }
        Err(err) => {
            report_rejection(out, &args.path, &err)?;
            Ok(EXIT_REJECTED)
        }
    }
}
