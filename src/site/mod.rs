//! The site's interactive surface.
//!
//! [`Site`] wires every page affordance to the core: the header and order
//! modal toggles, menu page analytics, the partner directory, and the three
//! independent form instances (contact form, footer newsletter, contact page
//! newsletter).

mod header;
mod toggle;

pub use header::{Header, NavItem, NAVIGATION};
pub use toggle::Toggle;

use crate::client::NotificationGateway;
use crate::forms::{ContactFormController, DismissPolicy, NewsletterController};
use crate::metrics::Metrics;
use crate::models::{FeaturedItem, Menu, MenuItem, ShopInfo};
use crate::partners::{AnalyticsHandle, DeliveryPartnerDirectory, LinkOpener};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Identifies one of the site's forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Contact,
    FooterNewsletter,
    ContactNewsletter,
}

impl FormId {
    pub const ALL: [FormId; 3] = [
        FormId::Contact,
        FormId::FooterNewsletter,
        FormId::ContactNewsletter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::FooterNewsletter => "footer_newsletter",
            Self::ContactNewsletter => "contact_newsletter",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact" => Ok(Self::Contact),
            "footer_newsletter" | "footer" => Ok(Self::FooterNewsletter),
            "contact_newsletter" | "newsletter" => Ok(Self::ContactNewsletter),
            other => Err(format!(
                "Unknown form '{}': expected contact, footer_newsletter or contact_newsletter",
                other
            )),
        }
    }
}

/// Everything a [`Site`] is built from.
pub struct SiteDeps {
    pub contact_gateway: Arc<dyn NotificationGateway>,
    pub newsletter_gateway: Arc<dyn NotificationGateway>,
    pub analytics: AnalyticsHandle,
    pub opener: Arc<dyn LinkOpener>,
    pub menu: Menu,
    pub recipient_name: String,
    pub status_display: Duration,
    pub metrics: Metrics,
}

/// The site: static content plus all interactive state.
pub struct Site {
    header: Header,
    order_modal: Toggle,
    menu: Menu,
    shop: ShopInfo,
    partners: DeliveryPartnerDirectory,
    analytics: AnalyticsHandle,
    contact_form: ContactFormController,
    footer_newsletter: NewsletterController,
    contact_newsletter: NewsletterController,
    metrics: Metrics,
}

impl Site {
    pub fn new(deps: SiteDeps) -> Self {
        let SiteDeps {
            contact_gateway,
            newsletter_gateway,
            analytics,
            opener,
            menu,
            recipient_name,
            status_display,
            metrics,
        } = deps;

        let contact_form = ContactFormController::new(
            contact_gateway,
            DismissPolicy::contact(status_display),
            recipient_name.clone(),
        )
        .with_label(FormId::Contact.as_str())
        .with_metrics(metrics.clone());

        let footer_newsletter = NewsletterController::new(
            newsletter_gateway.clone(),
            DismissPolicy::newsletter(status_display),
            recipient_name.clone(),
        )
        .with_label(FormId::FooterNewsletter.as_str())
        .with_metrics(metrics.clone());

        let contact_newsletter = NewsletterController::new(
            newsletter_gateway,
            DismissPolicy::newsletter(status_display),
            recipient_name,
        )
        .with_label(FormId::ContactNewsletter.as_str())
        .with_metrics(metrics.clone());

        let partners = DeliveryPartnerDirectory::with_defaults(analytics.clone(), opener)
            .with_metrics(metrics.clone());

        Self {
            header: Header::default(),
            order_modal: Toggle::default(),
            menu,
            shop: ShopInfo::default(),
            partners,
            analytics,
            contact_form,
            footer_newsletter,
            contact_newsletter,
            metrics,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Home page highlights.
    pub fn featured_items(&self) -> Vec<FeaturedItem> {
        self.menu.featured_items()
    }

    pub fn shop(&self) -> &ShopInfo {
        &self.shop
    }

    pub fn partners(&self) -> &DeliveryPartnerDirectory {
        &self.partners
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn contact_form(&self) -> &ContactFormController {
        &self.contact_form
    }

    /// A newsletter instance; `None` for the contact form id.
    pub fn newsletter(&self, id: FormId) -> Option<&NewsletterController> {
        match id {
            FormId::FooterNewsletter => Some(&self.footer_newsletter),
            FormId::ContactNewsletter => Some(&self.contact_newsletter),
            FormId::Contact => None,
        }
    }

    pub fn is_order_modal_open(&self) -> bool {
        self.order_modal.is_open()
    }

    pub fn open_order_modal(&self) {
        self.order_modal.open();
    }

    pub fn close_order_modal(&self) {
        self.order_modal.close();
    }

    /// Header "Order Now": collapses the mobile menu and opens the modal.
    pub fn header_order_now(&self) {
        self.header.follow_link();
        self.order_modal.open();
    }

    /// Menu page "add to order" on an item.
    ///
    /// Only items on the menu count; anything else returns `None` and neither
    /// tracks nor opens the modal.
    pub fn add_to_order(&self, item_name: &str, category: &str) -> Option<&MenuItem> {
        let category = self.menu.category(category)?;
        let item = category.item(item_name)?;

        self.analytics.track(
            "menu_item",
            &format!("{} - {}", category.name, item.name),
            "add_to_order",
        );
        self.order_modal.open();
        Some(item)
    }

    /// Menu page "Order Now" call to action.
    pub fn menu_order_now(&self) {
        self.analytics
            .track("cta_button", "menu_page_order_now", "order_now");
        self.order_modal.open();
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("order_modal_open", &self.is_order_modal_open())
            .field("partners", &self.partners)
            .field("contact_form", &self.contact_form)
            .finish()
    }
}
