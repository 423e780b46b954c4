//! The two kinds of form the site has.
//!
//! A [`SubmissionForm`] tells the controller how to validate its fields and how
//! to turn a validated submission into template parameters. The state machine
//! itself is shared.

use crate::domain::ValidationError;
use crate::models::{
    ContactFields, ContactSubmission, NewsletterFields, NewsletterSubmission, TemplateParams,
};

/// Form-specific behaviour plugged into a `SubmissionController`.
pub trait SubmissionForm: Send + Sync + 'static {
    /// Raw field state as typed by the user.
    type Fields: Clone + Default + Send + Sync + 'static;

    /// Validated payload.
    type Submission: Send;

    /// Used in log lines.
    const KIND: &'static str;

    /// Pure validation of the current fields.
    fn validate(fields: &Self::Fields) -> Result<Self::Submission, ValidationError>;

    fn template_params(submission: &Self::Submission, to_name: &str) -> TemplateParams;

    /// Success banner text.
    fn success_message() -> &'static str;
}

/// The contact page message form.
#[derive(Debug, Clone, Copy)]
pub struct ContactForm;

impl SubmissionForm for ContactForm {
    type Fields = ContactFields;
    type Submission = ContactSubmission;

    const KIND: &'static str = "contact";

    fn validate(fields: &ContactFields) -> Result<ContactSubmission, ValidationError> {
        ContactSubmission::try_from(fields)
    }

    fn template_params(submission: &ContactSubmission, to_name: &str) -> TemplateParams {
        submission.template_params(to_name)
    }

    fn success_message() -> &'static str {
        "Thank you! Your message has been sent successfully. We'll get back to you soon."
    }
}

/// A newsletter signup form (footer or contact page).
#[derive(Debug, Clone, Copy)]
pub struct NewsletterForm;

impl SubmissionForm for NewsletterForm {
    type Fields = NewsletterFields;
    type Submission = NewsletterSubmission;

    const KIND: &'static str = "newsletter";

    fn validate(fields: &NewsletterFields) -> Result<NewsletterSubmission, ValidationError> {
        NewsletterSubmission::try_from(fields)
    }

    fn template_params(submission: &NewsletterSubmission, to_name: &str) -> TemplateParams {
        submission.template_params(to_name)
    }

    fn success_message() -> &'static str {
        "Thank you for subscribing! You'll receive updates about special offers and new menu items."
    }
}
