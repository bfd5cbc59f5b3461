//! Pages and the menu entries derived from them.

use serde::{Deserialize, Serialize};

use crate::section::Section;

/// One routable page. List order is menu order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfiguration {
    pub page_name: String,
    pub menu_title: String,
    /// Unique, path-like route such as `/` or `/about`.
    pub route: String,
    pub sections: Vec<Section>,
}

impl PageConfiguration {
    /// The menu entry for this page.
    pub fn menu_item(&self) -> MenuItem {
        MenuItem {
            menu_title: self.menu_title.clone(),
            page_name: self.page_name.clone(),
            route: self.route.clone(),
        }
    }

    /// First section with the given name.
    pub fn section(&self, section_name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.section_name() == section_name)
    }
}

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_title: String,
    pub page_name: String,
    pub route: String,
}
