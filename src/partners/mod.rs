//! Delivery partners and the side effects of ordering through them.
//!
//! Analytics and link opening are injected capabilities so tests can observe
//! them without real navigation.

mod analytics;
mod directory;
mod opener;

pub use analytics::{Analytics, AnalyticsEvent, AnalyticsHandle, TracingAnalytics};
pub use directory::{DeliveryPartnerDirectory, PARTNER_EVENT_CATEGORY};
pub use opener::{LinkOpener, LogOnlyOpener, SystemBrowser};
