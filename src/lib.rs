//! Sandüich Republic site core.
//!
//! The interactive parts of a small sandwich shop website, served to AI
//! assistants over the Model Context Protocol: browsing the menu, ordering
//! through delivery partners, and the contact and newsletter forms.
//!
//! # Architecture
//!
//! - **domain**: Field validation (`EmailAddress`, `RequiredText`, `ValidationError`)
//! - **models**: Form state, submissions, template parameters, menu, partners
//! - **client**: EmailJS HTTP client and the async `NotificationGateway` seam
//! - **forms**: The per-form submission state machine
//! - **partners**: Delivery partner directory with injected analytics and link opening
//! - **site**: Header, order modal, menu page actions and the three form instances
//! - **server**: MCP protocol server
//! - **config** / **error** / **metrics**: Ambient plumbing

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod metrics;
pub mod models;
pub mod partners;
pub mod server;
pub mod site;

pub use client::{EmailJsClient, EmailJsGateway, NotificationGateway};
pub use config::Config;
pub use domain::{EmailAddress, Field, RequiredText, ValidationError};
pub use error::{ConfigError, DispatchError, MenuError};
pub use forms::{
    ContactForm, ContactFormController, DismissPolicy, FormError, NewsletterController,
    NewsletterForm, SubmissionController, SubmissionStatus, SubmitOutcome,
};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    ContactFields, ContactSubmission, DeliveryPartner, Menu, NewsletterFields,
    NewsletterSubmission, TemplateParams,
};
pub use partners::{Analytics, AnalyticsEvent, AnalyticsHandle, DeliveryPartnerDirectory, LinkOpener};
pub use server::SiteMcpServer;
pub use site::{FormId, Site, SiteDeps};
