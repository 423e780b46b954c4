//! HTTP client for the EmailJS transactional email API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client builds the provider's request body,
//! maps HTTP failures to [`DispatchError`], and records call metrics.
//!
//! The provider's response body is never consumed: any 2xx is a success.

mod async_wrapper;
pub use async_wrapper::{EmailJsGateway, NotificationGateway};

use crate::config::Config;
use crate::error::{DispatchError, DispatchResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::TemplateParams;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Path of the EmailJS send endpoint, relative to the API base URL.
pub const SEND_PATH: &str = "/api/v1.0/email/send";

/// Request body for the EmailJS send endpoint.
#[derive(Debug, Serialize)]
pub struct SendEmailRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    /// The provider calls the public key `user_id`
    pub user_id: &'a str,
    pub template_params: &'a TemplateParams,
}

/// HTTP client for the EmailJS API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct EmailJsClient {
    /// Base URL for the EmailJS API
    base_url: String,

    /// EmailJS service id
    service_id: String,

    /// EmailJS public key
    public_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl EmailJsClient {
    /// Create a new EmailJsClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.emailjs_api_url.clone(),
            service_id: config.emailjs_service_id.clone(),
            public_key: config.emailjs_public_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create an EmailJsClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, service_id: String, public_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            service_id,
            public_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of the client's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Send one templated email.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] for transport failures and non-2xx statuses.
    pub fn send(&self, template_id: &str, params: &TemplateParams) -> DispatchResult<()> {
        let url = self.build_url(SEND_PATH);
        let body = serde_json::to_value(SendEmailRequest {
            service_id: &self.service_id,
            template_id,
            user_id: &self.public_key,
            template_params: params,
        })?;

        tracing::debug!(template_id = %template_id, "POST {}", url);

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("POST {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::warn!("POST {} - Error: {:?}", url, e);
                timer.complete_with_error();
            }
        }

        result.map(|_| ())
    }

    /// Map a ureq error to a DispatchError.
    fn map_error(&self, error: ureq::Error) -> DispatchError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => DispatchError::Unauthorized,
                    429 => DispatchError::RateLimitExceeded,
                    _ => DispatchError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DispatchError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    DispatchError::Timeout
                } else {
                    DispatchError::HttpError(transport.to_string())
                }
            }
        }
    }
}

impl std::fmt::Debug for EmailJsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailJsClient")
            .field("base_url", &self.base_url)
            .field("service_id", &self.service_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> EmailJsClient {
        EmailJsClient::with_base_url(
            base_url.to_string(),
            "service_test".to_string(),
            "public_test".to_string(),
        )
    }

    #[test]
    fn test_build_url_joins_slashes() {
        assert_eq!(
            client("https://api.emailjs.com/").build_url(SEND_PATH),
            "https://api.emailjs.com/api/v1.0/email/send"
        );
        assert_eq!(
            client("https://api.emailjs.com").build_url("api/v1.0/email/send"),
            "https://api.emailjs.com/api/v1.0/email/send"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let params = TemplateParams {
            from_name: "Ana".to_string(),
            from_email: "ana@example.com".to_string(),
            message: "Hola".to_string(),
            to_name: "Sandüich Republic".to_string(),
            subject: None,
        };
        let body = serde_json::to_value(SendEmailRequest {
            service_id: "svc",
            template_id: "tpl",
            user_id: "pk",
            template_params: &params,
        })
        .unwrap();

        assert_eq!(body["service_id"], "svc");
        assert_eq!(body["template_id"], "tpl");
        assert_eq!(body["user_id"], "pk");
        assert_eq!(body["template_params"]["from_name"], "Ana");
        assert!(body["template_params"].get("subject").is_none());
    }

    #[test]
    fn test_debug_hides_public_key() {
        let debug = format!("{:?}", client("https://api.emailjs.com"));
        assert!(debug.contains("service_test"));
        assert!(!debug.contains("public_test"));
    }
}
