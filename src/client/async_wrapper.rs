//! Async gateway over the synchronous EmailJsClient.
//!
//! [`NotificationGateway`] is the seam the submission controllers depend on; tests
//! swap in a fake. [`EmailJsGateway`] runs the blocking HTTP call on tokio's
//! blocking pool so the runtime stays responsive while a form is in flight.

use crate::client::EmailJsClient;
use crate::error::{DispatchError, DispatchResult};
use crate::models::TemplateParams;
use async_trait::async_trait;
use std::sync::Arc;

/// Sends one templated notification.
///
/// Success carries no payload. Failure carries an opaque cause that callers
/// log but never branch on.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, params: &TemplateParams) -> DispatchResult<()>;
}

/// EmailJS-backed gateway bound to a single template.
///
/// Several gateways can share one client (the contact form and the newsletter
/// forms use different templates on the same service).
#[derive(Clone)]
pub struct EmailJsGateway {
    client: Arc<EmailJsClient>,
    template_id: String,
}

impl EmailJsGateway {
    pub fn new(client: Arc<EmailJsClient>, template_id: impl Into<String>) -> Self {
        Self {
            client,
            template_id: template_id.into(),
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }
}

#[async_trait]
impl NotificationGateway for EmailJsGateway {
    async fn send(&self, params: &TemplateParams) -> DispatchResult<()> {
        let client = self.client.clone();
        let template_id = self.template_id.clone();
        let params = params.clone();

        tokio::task::spawn_blocking(move || client.send(&template_id, &params))
            .await
            .map_err(|e| DispatchError::HttpError(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_gateways_share_client() {
        let config = Config {
            emailjs_service_id: "service_test".to_string(),
            emailjs_template_id: "template_contact".to_string(),
            emailjs_newsletter_template_id: "template_news".to_string(),
            emailjs_public_key: "public_test".to_string(),
            ..Config::default()
        };
        let client = Arc::new(EmailJsClient::new(&config));

        let contact = EmailJsGateway::new(client.clone(), &config.emailjs_template_id);
        let newsletter = EmailJsGateway::new(client, &config.emailjs_newsletter_template_id);

        assert_eq!(contact.template_id(), "template_contact");
        assert_eq!(newsletter.template_id(), "template_news");

        // Should be able to clone
        let _cloned = contact.clone();
    }
}
