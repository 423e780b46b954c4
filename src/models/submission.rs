//! Form field state, validated submissions, and the template parameters sent
//! to the email provider.

use crate::domain::{EmailAddress, Field, RequiredText, ValidationError};
use serde::{Deserialize, Serialize};

/// `from_name` used for every newsletter subscription.
pub const NEWSLETTER_SENDER_NAME: &str = "Newsletter Subscriber";

/// `subject` used for every newsletter subscription.
pub const NEWSLETTER_SUBJECT: &str = "Newsletter Subscription";

/// Raw contact form state, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Update a single field, as an input change event would.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Message => self.message = value,
        }
    }
}

/// Raw newsletter form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterFields {
    pub email: String,
}

impl NewsletterFields {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: RequiredText,
    pub email: EmailAddress,
    pub message: RequiredText,
}

impl TryFrom<&ContactFields> for ContactSubmission {
    type Error = ValidationError;

    /// Checks name, then email, then message; the first failure wins.
    fn try_from(fields: &ContactFields) -> Result<Self, Self::Error> {
        let name = RequiredText::parse(&fields.name, Field::Name)?;
        let email = EmailAddress::parse(&fields.email)?;
        let message = RequiredText::parse(&fields.message, Field::Message)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}

impl ContactSubmission {
    pub fn template_params(&self, to_name: &str) -> TemplateParams {
        TemplateParams {
            from_name: self.name.as_str().to_string(),
            from_email: self.email.as_str().to_string(),
            message: self.message.as_str().to_string(),
            to_name: to_name.to_string(),
            subject: None,
        }
    }
}

/// A newsletter subscription that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsletterSubmission {
    pub email: EmailAddress,
}

impl TryFrom<&NewsletterFields> for NewsletterSubmission {
    type Error = ValidationError;

    fn try_from(fields: &NewsletterFields) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::parse(&fields.email)?,
        })
    }
}

impl NewsletterSubmission {
    pub fn template_params(&self, to_name: &str) -> TemplateParams {
        TemplateParams {
            from_name: NEWSLETTER_SENDER_NAME.to_string(),
            from_email: self.email.as_str().to_string(),
            message: format!(
                "New newsletter subscription request from: {}",
                self.email
            ),
            to_name: to_name.to_string(),
            subject: Some(NEWSLETTER_SUBJECT.to_string()),
        }
    }
}

/// Flat parameter map rendered into the provider's email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
    pub to_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}
