//! Configuration management for the site core.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through `dotenvy`, which never prints.
//!
//! The EmailJS identifiers are client-exposed by the provider's design, so they are
//! treated as plain configuration rather than secrets.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default EmailJS REST endpoint.
pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com";

/// Default label used as `to_name` in every outgoing template.
pub const DEFAULT_RECIPIENT_NAME: &str = "Sandüich Republic";

/// Configuration for the site core.
#[derive(Debug, Clone)]
pub struct Config {
    /// EmailJS API base URL
    pub emailjs_api_url: String,

    /// EmailJS service id
    pub emailjs_service_id: String,

    /// EmailJS template id used by the contact form
    pub emailjs_template_id: String,

    /// EmailJS template id used by the newsletter forms
    /// (falls back to the contact template)
    pub emailjs_newsletter_template_id: String,

    /// EmailJS public key (sent as `user_id`)
    pub emailjs_public_key: String,

    /// Recipient label rendered into every template (default: "Sandüich Republic")
    pub recipient_name: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// How long success/error banners stay up, in seconds (default: 3)
    pub status_display_secs: u64,

    /// Optional path to a menu JSON file; the bundled menu is used when unset
    pub menu_path: Option<PathBuf>,

    /// Open partner links in the host browser instead of only returning them (default: false)
    pub open_in_browser: bool,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `EMAILJS_SERVICE_ID`
    /// - `EMAILJS_TEMPLATE_ID`
    /// - `EMAILJS_PUBLIC_KEY`
    ///
    /// Optional environment variables:
    /// - `EMAILJS_API_URL`: Base URL (default: https://api.emailjs.com)
    /// - `EMAILJS_NEWSLETTER_TEMPLATE_ID`: Newsletter template (default: contact template)
    /// - `RECIPIENT_NAME`: `to_name` label (default: "Sandüich Republic")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `STATUS_DISPLAY_SECS`: Banner auto-dismiss window (default: 3)
    /// - `MENU_PATH`: Menu JSON file
    /// - `OPEN_IN_BROWSER`: Open partner links on the host (default: false)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let emailjs_api_url =
            env::var("EMAILJS_API_URL").unwrap_or_else(|_| DEFAULT_EMAILJS_API_URL.to_string());

        if !emailjs_api_url.starts_with("http://") && !emailjs_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "EMAILJS_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let emailjs_service_id = Self::required_var("EMAILJS_SERVICE_ID")?;
        let emailjs_template_id = Self::required_var("EMAILJS_TEMPLATE_ID")?;
        let emailjs_public_key = Self::required_var("EMAILJS_PUBLIC_KEY")?;

        let emailjs_newsletter_template_id = env::var("EMAILJS_NEWSLETTER_TEMPLATE_ID")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| emailjs_template_id.clone());

        let recipient_name =
            env::var("RECIPIENT_NAME").unwrap_or_else(|_| DEFAULT_RECIPIENT_NAME.to_string());

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let status_display_secs = Self::parse_env_u64("STATUS_DISPLAY_SECS", 3)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let menu_path = env::var("MENU_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let open_in_browser = Self::parse_env_bool("OPEN_IN_BROWSER", false)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            emailjs_api_url,
            emailjs_service_id,
            emailjs_template_id,
            emailjs_newsletter_template_id,
            emailjs_public_key,
            recipient_name,
            request_timeout,
            status_display_secs,
            menu_path,
            open_in_browser,
            log_level,
        })
    }

    /// Banner auto-dismiss window as a `Duration`.
    pub fn status_display(&self) -> Duration {
        Duration::from_secs(self.status_display_secs)
    }

    /// Read a variable that must be present and non-blank.
    fn required_var(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;

        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Ok(value)
    }

    /// Parse an environment variable as a boolean flag with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            emailjs_api_url: DEFAULT_EMAILJS_API_URL.to_string(),
            emailjs_service_id: String::new(),
            emailjs_template_id: String::new(),
            emailjs_newsletter_template_id: String::new(),
            emailjs_public_key: String::new(),
            recipient_name: DEFAULT_RECIPIENT_NAME.to_string(),
            request_timeout: 10,
            status_display_secs: 3,
            menu_path: None,
            open_in_browser: false,
            log_level: "error".to_string(),
        }
    }
}
