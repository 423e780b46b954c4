//! Menu model, read-only after load.

use crate::error::{MenuError, MenuResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Menu bundled with the crate, used when no `MENU_PATH` is configured.
const BUNDLED_MENU: &str = include_str!("../../data/menu.json");

/// The full menu: an ordered list of categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub categories: Vec<MenuCategory>,
}

/// A named group of menu items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// A single menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub desc: String,
}

impl MenuCategory {
    /// Find an item by name, ignoring case.
    pub fn item(&self, name: &str) -> Option<&MenuItem> {
        self.items
            .iter()
            .find(|i| i.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl MenuItem {
    /// Price formatted for display, e.g. `$13.50`.
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// A menu item highlighted on the home page, tagged with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub category: String,
}

impl Menu {
    /// Parse menu JSON.
    pub fn from_json(json: &str) -> MenuResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load menu JSON from a file.
    pub fn from_path(path: &Path) -> MenuResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The menu shipped with the crate.
    pub fn bundled() -> MenuResult<Self> {
        Self::from_json(BUNDLED_MENU)
    }

    /// Find a category by name, ignoring case.
    pub fn category(&self, name: &str) -> Option<&MenuCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    /// First item of every non-empty category, in menu order.
    pub fn featured_items(&self) -> Vec<FeaturedItem> {
        self.categories
            .iter()
            .filter_map(|category| {
                category.items.first().map(|item| FeaturedItem {
                    item: item.clone(),
                    category: category.name.clone(),
                })
            })
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
