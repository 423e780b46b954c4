//! Delivery partner directory.

use super::analytics::AnalyticsHandle;
use super::opener::LinkOpener;
use crate::metrics::Metrics;
use crate::models::DeliveryPartner;
use std::sync::Arc;

/// Analytics category for partner clicks.
pub const PARTNER_EVENT_CATEGORY: &str = "delivery_partner";

/// Ordered, read-only list of delivery partners plus the order action.
///
/// Shared by the Order page and the order modal.
#[derive(Clone)]
pub struct DeliveryPartnerDirectory {
    partners: Arc<[DeliveryPartner]>,
    analytics: AnalyticsHandle,
    opener: Arc<dyn LinkOpener>,
    metrics: Metrics,
}

impl DeliveryPartnerDirectory {
    pub fn new(
        partners: Vec<DeliveryPartner>,
        analytics: AnalyticsHandle,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            partners: partners.into(),
            analytics,
            opener,
            metrics: Metrics::new(),
        }
    }

    /// Directory with the default partners.
    pub fn with_defaults(analytics: AnalyticsHandle, opener: Arc<dyn LinkOpener>) -> Self {
        Self::new(DeliveryPartner::defaults(), analytics, opener)
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Partners in display order.
    pub fn list_partners(&self) -> &[DeliveryPartner] {
        &self.partners
    }

    /// Find a partner by name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&DeliveryPartner> {
        let name = name.trim();
        self.partners
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Order through `partner`.
    ///
    /// Available partners emit one analytics event labelled with the partner
    /// name, then open the partner URL. Unavailable partners are inert.
    pub fn open_partner(&self, partner: &DeliveryPartner) {
        if !partner.available {
            tracing::debug!(partner = %partner.name, "Ignoring click on unavailable partner");
            return;
        }

        self.analytics
            .track(PARTNER_EVENT_CATEGORY, &partner.name, "click");
        self.opener.open_new_context(&partner.url);
        self.metrics.record_partner_open();
    }
}

impl std::fmt::Debug for DeliveryPartnerDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryPartnerDirectory")
            .field("partners", &self.partners.len())
            .field("analytics", &self.analytics)
            .finish()
    }
}
