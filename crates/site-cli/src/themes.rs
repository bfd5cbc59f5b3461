//! # Themes Subcommand
//!
//! Shows the theme set a renderer would offer for a document, after
//! theme-count defaulting, and optionally previews switching to another
//! theme.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use site_schema::ThemeSet;

use crate::{load_or_report, EXIT_REJECTED};

/// Arguments for the `site themes` subcommand.
#[derive(Args, Debug)]
pub struct ThemesArgs {
    /// Site configuration document.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Make this theme active before printing.
    #[arg(long, value_name = "NAME")]
    pub select: Option<String>,

    /// Print the theme set as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run_themes(args: &ThemesArgs, out: &mut dyn Write) -> Result<u8> {
    let config = match load_or_report(out, &args.path)? {
        Ok(config) => config,
        Err(code) => return Ok(code),
    };

    let mut themes = ThemeSet::resolve(&config);
    if let Some(name) = &args.select {
        if let Err(err) = themes.select(name) {
            writeln!(out, "FAIL: {err}")?;
            return Ok(EXIT_REJECTED);
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&themes)?)?;
        return Ok(0);
    }

    for option in themes.available() {
        let marker = if option.name == themes.active_name() { '*' } else { ' ' };
        let mode = if option.theme.is_dark() { "dark" } else { "light" };
        writeln!(
            out,
            "{marker} {:<12} {:<5} primary {}  background {}",
            option.name, mode, option.theme.primary_color, option.theme.background_color
        )?;
    }
    writeln!(
        out,
        "switcher: {}",
        if themes.switcher_visible() { "visible" } else { "hidden" }
    )?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_THEMES: &str = r#"{"site":{"siteName":"Acme"},"themes":[],"pages":[],"i18n":{}}"#;

    fn run(text: &str, select: Option<&str>, json: bool) -> (u8, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, text).unwrap();
        let args = ThemesArgs {
            path,
            select: select.map(String::from),
            json,
        };
        let mut out = Vec::new();
        let code = run_themes(&args, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn no_configured_themes_shows_default() {
        let (code, out) = run(NO_THEMES, None, false);
        assert_eq!(code, 0);
        assert!(out.starts_with("* Default"), "{out}");
        assert!(out.contains("primary #0076d2"), "{out}");
        assert!(out.ends_with("switcher: hidden\n"), "{out}");
    }

    #[test]
    fn selecting_an_unknown_theme_fails() {
        let (code, out) = run(NO_THEMES, Some("Neon"), false);
        assert_eq!(code, 1);
        assert!(out.starts_with("FAIL: "), "{out}");
        assert!(out.contains("Neon"), "{out}");
    }

    #[test]
    fn json_output_matches_api_shape() {
        let (code, out) = run(NO_THEMES, Some("Default"), true);
        assert_eq!(code, 0);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["active"], "Default");
        assert_eq!(value["switcherVisible"], false);
    }

    #[test]
    fn invalid_document_is_reported() {
        let (code, out) = run(r#"{"site":{"siteName":"Acme"}}"#, None, false);
        assert_eq!(code, 1);
        assert!(out.contains("  themes: is required"), "{out}");
    }
}
