//! Site header: navigation and the mobile menu.

use super::toggle::Toggle;
use serde::Serialize;

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        name: "Home",
        href: "/",
    },
    NavItem {
        name: "Menu",
        href: "/menu",
    },
    NavItem {
        name: "Order Online",
        href: "/order",
    },
    NavItem {
        name: "Location & Contact",
        href: "/contact",
    },
];

#[derive(Debug, Default)]
pub struct Header {
    mobile_menu: Toggle,
}

impl Header {
    pub fn navigation(&self) -> &'static [NavItem] {
        NAVIGATION
    }

    /// Whether `item` is the page at `current_path`.
    pub fn is_active(&self, item: &NavItem, current_path: &str) -> bool {
        item.href == current_path
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu.is_open()
    }

    pub fn toggle_mobile_menu(&self) -> bool {
        self.mobile_menu.toggle()
    }

    /// Following a link collapses the mobile menu.
    pub fn follow_link(&self) {
        self.mobile_menu.close();
    }
}
