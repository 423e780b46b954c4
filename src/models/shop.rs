//! Shop details shown in the footer and on the contact page.

use serde::Serialize;

/// Static shop information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopInfo {
    pub name: String,
    pub tagline: String,
    pub location: String,
    pub address: String,
    pub hours: String,
}

impl Default for ShopInfo {
    fn default() -> Self {
        Self {
            name: "Sandüich Republic".to_string(),
            tagline: "Latin-inspired gourmet sandwiches made fresh daily.".to_string(),
            location: "Inside Wonderful Mart".to_string(),
            address: "2368 Massachusetts Avenue, Cambridge, MA 02140".to_string(),
            hours: "Monday - Saturday: 9:00 AM - 7:00 PM".to_string(),
        }
    }
}
