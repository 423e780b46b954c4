//! Delivery partner records.

use serde::{Deserialize, Serialize};

/// A third-party delivery platform the shop can be ordered through.
///
/// Immutable once the directory is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPartner {
    /// Display name, also the analytics label
    pub name: String,

    /// Storefront URL opened in a new browsing context
    pub url: String,

    /// Whether ordering through this partner is currently possible
    pub available: bool,

    /// Logo asset path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    #[serde(default)]
    pub description: String,
}

impl DeliveryPartner {
    /// A bare partner with only the fields the order flow needs.
    pub fn new(name: impl Into<String>, url: impl Into<String>, available: bool) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            available,
            logo: None,
            estimated_time: None,
            delivery_fee: None,
            rating: None,
            description: String::new(),
        }
    }

    /// DoorDash, UberEats and Grubhub, in display order.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                logo: Some("/DoorDash2.png".to_string()),
                estimated_time: Some("25-35 min".to_string()),
                delivery_fee: Some("$2.99".to_string()),
                rating: Some(4.8),
                description: "Fast and reliable delivery with real-time tracking".to_string(),
                ..Self::new(
                    "DoorDash",
                    "https://order.online/business/sanduich-republic-14288787",
                    true,
                )
            },
            Self {
                logo: Some("/UberEats.png".to_string()),
                estimated_time: Some("20-30 min".to_string()),
                delivery_fee: Some("$1.99".to_string()),
                rating: Some(4.7),
                description: "Quick delivery with upfront pricing".to_string(),
                ..Self::new(
                    "UberEats",
                    "https://www.order.store/store/sanduich-republic/_EmmdgNPXn23sQEPLZNScg",
                    true,
                )
            },
            Self {
                logo: Some("/Grubhub2.png".to_string()),
                rating: Some(4.6),
                description: "Order pickup or delivery from our online storefront".to_string(),
                ..Self::new("Grubhub", "https://sanduichrepublic.dine.online", true)
            },
        ]
    }
}
