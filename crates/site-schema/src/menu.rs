//! Navigation menu derived from the page list.

use serde::Serialize;
use site_core::{MenuItem, PageConfiguration};

/// Menu entries in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
}

impl MenuConfig {
    pub fn from_pages(pages: &[PageConfiguration]) -> Self {
        Self {
            items: pages.iter().map(PageConfiguration::menu_item).collect(),
        }
    }

    /// Entry for `route`.
    pub fn find(&self, route: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.route == route)
    }
}
