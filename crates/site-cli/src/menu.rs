//! Menu subcommand: the navigation entries derived from the page list.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use site_core::Locale;
use site_schema::SiteContext;

use crate::load_or_report;

/// Arguments for the `site menu` subcommand.
#[derive(Args, Debug)]
pub struct MenuArgs {
    /// Site configuration document.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Translate titles through `menu.<pageName>` keys in this locale.
    #[arg(long)]
    pub locale: Option<Locale>,
}

pub fn run_menu(args: &MenuArgs, out: &mut dyn Write) -> Result<u8> {
    let site = match load_or_report(out, &args.path)? {
        Ok(config) => SiteContext::new(config),
        Err(code) => return Ok(code),
    };

    let messages = args.locale.map(|locale| site.messages(locale));
    for item in &site.menu().items {
        let title = match &messages {
            Some(messages) => {
                let key = format!("menu.{}", item.page_name);
                messages.get(&key).unwrap_or(item.menu_title.as_str()).to_string()
            }
            None => item.menu_title.clone(),
        };
        writeln!(out, "{:<20} {:<20} ({})", title, item.route, item.page_name)?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "site": { "siteName": "Acme" },
        "themes": [],
        "pages": [
            { "pageName": "home", "menuTitle": "Home", "route": "/", "sections": [] },
            { "pageName": "about", "menuTitle": "About", "route": "/about", "sections": [] }
        ],
        "i18n": { "fr": { "menu.home": "Accueil" } }
    }"#;

    fn run(locale: Option<Locale>) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, DOC).unwrap();
        let mut out = Vec::new();
        let code = run_menu(&MenuArgs { path, locale }, &mut out).unwrap();
        assert_eq!(code, 0);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_pages_in_order() {
        let out = run(None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Home"));
        assert!(lines[1].contains("/about"));
        assert!(lines[1].ends_with("(about)"));
    }

    #[test]
    fn translated_titles_fall_back_to_menu_title() {
        let out = run(Some(Locale::Fr));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with("Accueil"), "{out}");
        assert!(lines[1].starts_with("About"), "{out}");
    }
}
