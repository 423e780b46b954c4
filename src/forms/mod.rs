//! Form submission workflow.
//!
//! One generic [`SubmissionController`] drives every form on the site:
//! validate locally, dispatch through a [`crate::client::NotificationGateway`],
//! then show a banner that may auto-dismiss according to a [`DismissPolicy`].

mod controller;
mod form;
mod policy;
mod status;

pub use controller::SubmissionController;
pub use form::{ContactForm, NewsletterForm, SubmissionForm};
pub use policy::{DismissPolicy, DEFAULT_DISPLAY_WINDOW};
pub use status::{
    Banner, BannerKind, FormError, SubmissionStatus, SubmitOutcome, DISPATCH_FAILURE_MESSAGE,
};

/// Controller for the contact page message form.
pub type ContactFormController = SubmissionController<ContactForm>;

/// Controller for a newsletter signup form.
pub type NewsletterController = SubmissionController<NewsletterForm>;
