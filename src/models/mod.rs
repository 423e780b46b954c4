//! Data models for the site.
//!
//! This module contains the form state and validated submissions, the menu,
//! delivery partner records and static shop details.

pub mod menu;
pub mod partner;
pub mod shop;
pub mod submission;

pub use menu::{FeaturedItem, Menu, MenuCategory, MenuItem};
pub use partner::DeliveryPartner;
pub use shop::ShopInfo;
pub use submission::{
    ContactFields, ContactSubmission, NewsletterFields, NewsletterSubmission, TemplateParams,
};
