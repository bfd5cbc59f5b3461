//! # Integration Tests for site-cli
//!
//! Runs every subcommand against the demo document shipped in `demos/`
//! and against edited copies of it.

use std::path::PathBuf;

use site_cli::menu::{run_menu, MenuArgs};
use site_cli::messages::{run_messages, MessagesArgs};
use site_cli::themes::{run_themes, ThemesArgs};
use site_cli::validate::{run_validate, ValidateArgs};
use site_core::Locale;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/site-config.json")
}

fn edited_demo(dir: &tempfile::TempDir, edit: impl FnOnce(&mut serde_json::Value)) -> PathBuf {
    let text = std::fs::read_to_string(demo_path()).unwrap();
    let mut doc: serde_json::Value = serde_json::from_str(&text).unwrap();
    edit(&mut doc);
    let path = dir.path().join("site-config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    path
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_validate_demo_document() {
    let mut out = Vec::new();
    let args = ValidateArgs {
        path: demo_path(),
        json: false,
    };
    assert_eq!(run_validate(&args, &mut out).unwrap(), 0);
    let out = output(out);
    assert!(out.contains("2 page(s), 3 section(s), 2 theme(s)"), "{out}");
}

#[test]
fn test_validate_reports_failures_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = edited_demo(&dir, |doc| {
        doc["i18n"]["de"] = serde_json::json!({});
        doc["themes"][1]["themeName"] = serde_json::json!("Light");
        doc["site"]["logoUrl"] = serde_json::json!("ftp://cdn/logo.svg");
    });
    let mut out = Vec::new();
    let code = run_validate(&ValidateArgs { path, json: false }, &mut out).unwrap();
    assert_eq!(code, 1);

    let out = output(out);
    let lines: Vec<&str> = out.lines().filter(|l| l.starts_with("  ")).collect();
    assert_eq!(
        lines,
        vec![
            "  site.logoUrl: must be a valid HTTP(S) URL or local path",
            "  themes[1].themeName: duplicate theme name \"Light\"; each theme name must be unique",
            "  i18n.de: locale must be one of {en, fr}",
        ]
    );
    assert!(out.ends_with("3 error(s)\n"), "{out}");
}

#[test]
fn test_themes_for_demo_document() {
    let mut out = Vec::new();
    let args = ThemesArgs {
        path: demo_path(),
        select: Some("Dark".into()),
        json: false,
    };
    assert_eq!(run_themes(&args, &mut out).unwrap(), 0);
    let out = output(out);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("  Light"), "{out}");
    assert!(lines[1].starts_with("* Dark"), "{out}");
    assert!(lines[1].contains("dark"), "{out}");
    assert_eq!(lines[2], "switcher: visible");
}

#[test]
fn test_single_theme_hides_switcher() {
    let dir = tempfile::tempdir().unwrap();
    let path = edited_demo(&dir, |doc| {
        doc["themes"].as_array_mut().unwrap().truncate(1);
    });
    let mut out = Vec::new();
    let args = ThemesArgs {
        path,
        select: None,
        json: true,
    };
    assert_eq!(run_themes(&args, &mut out).unwrap(), 0);
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["switcherVisible"], false);
    assert_eq!(value["available"].as_array().unwrap().len(), 1);
    assert_eq!(value["available"][0]["theme"]["themeName"], "Light");
}

#[test]
fn test_menu_for_demo_document() {
    let mut out = Vec::new();
    let args = MenuArgs {
        path: demo_path(),
        locale: Some(Locale::Fr),
    };
    assert_eq!(run_menu(&args, &mut out).unwrap(), 0);
    let out = output(out);
    let titles: Vec<&str> = out
        .lines()
        .map(|l| l.split_whitespace().next().unwrap())
        .collect();
    assert_eq!(titles, vec!["Accueil", "About"]);
}

#[test]
fn test_messages_for_demo_document() {
    let mut out = Vec::new();
    let args = MessagesArgs {
        path: demo_path(),
        locale: Locale::Fr,
        keys: vec!["menu.home".into(), "menu.about".into()],
    };
    assert_eq!(run_messages(&args, &mut out).unwrap(), 0);
    assert_eq!(
        output(out),
        "menu.home = Accueil\nmenu.about = About [fallback: en]\n"
    );
}

#[test]
fn test_subcommands_share_rejection_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = edited_demo(&dir, |doc| {
        doc["pages"][1]["route"] = serde_json::json!("/");
    });
    let mut out = Vec::new();
    let args = MenuArgs { path, locale: None };
    assert_eq!(run_menu(&args, &mut out).unwrap(), 1);
    let out = output(out);
    assert!(out.starts_with("FAIL: "), "{out}");
    assert!(out.contains("  pages[1].route: "), "{out}");
}
