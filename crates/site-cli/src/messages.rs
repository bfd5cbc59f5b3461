//! # Messages Subcommand
//!
//! Looks up translations the way a renderer would: requested locale
//! first, then the default locale, then the key itself. Without explicit
//! keys, prints every key defined in any locale and flags the ones the
//! requested locale is missing.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use site_core::Locale;
use site_schema::SiteContext;

use crate::{load_or_report, EXIT_REJECTED};

/// Arguments for the `site messages` subcommand.
#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Site configuration document.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Locale to translate into.
    #[arg(long, default_value_t = Locale::DEFAULT)]
    pub locale: Locale,

    /// Message keys to look up. Defaults to every key in the document.
    #[arg(value_name = "KEY")]
    pub keys: Vec<String>,
}

pub fn run_messages(args: &MessagesArgs, out: &mut dyn Write) -> Result<u8> {
    let site = match load_or_report(out, &args.path)? {
        Ok(config) => SiteContext::new(config),
        Err(code) => return Ok(code),
    };
    let messages = site.messages(args.locale);

    let keys: Vec<String> = if args.keys.is_empty() {
        let all: BTreeSet<&str> = site
            .config()
            .i18n
            .locales()
            .filter_map(|locale| site.config().i18n.dictionary(locale))
            .flat_map(|dictionary| dictionary.keys().map(|key| key.as_str()))
            .collect();
        all.into_iter().map(String::from).collect()
    } else {
        args.keys.clone()
    };

    let mut missing = 0usize;
    for key in &keys {
        let note = if messages.get(key).is_some() {
            ""
        } else if messages.translate(key) != key.as_str() {
            " [fallback: en]"
        } else {
            missing += 1;
            " [missing]"
        };
        writeln!(out, "{key} = {}{note}", messages.translate(key))?;
    }

    tracing::debug!(locale = %args.locale, keys = keys.len(), missing, "messages resolved");

    // Explicitly requested keys must resolve somewhere.
    if !args.keys.is_empty() && missing > 0 {
        return Ok(EXIT_REJECTED);
    }
    Ok(0)
}
