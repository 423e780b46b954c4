//! Error types for the Sandüich Republic site core.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field validation errors are not here; they live in [`crate::domain::ValidationError`].

use thiserror::Error;

/// Errors that can occur when dispatching an email through the provider.
///
/// The submission controller never inspects these structurally. They are logged
/// and then collapsed into one generic user-facing message.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider returned an error status code
    #[error("Provider error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Public key or service rejected by the provider
    #[error("Provider rejected credentials")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Failed to serialize the outbound request
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic dispatch error with context
    #[error("Dispatch error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors that can occur while loading menu data.
#[derive(Error, Debug)]
pub enum MenuError {
    /// Menu file could not be read
    #[error("Failed to read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Menu file is not valid menu JSON
    #[error("Invalid menu data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with DispatchError
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with MenuError
pub type MenuResult<T> = Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::Timeout;
        assert_eq!(err.to_string(), "Request timeout");

        let err = ConfigError::MissingVar("EMAILJS_PUBLIC_KEY".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: EMAILJS_PUBLIC_KEY"
        );

        let err = DispatchError::RateLimitExceeded;
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_api_error_variants() {
        let err = DispatchError::ApiError {
            status: 400,
            message: "The template ID is invalid".to_string(),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("template ID"));
    }

    #[test]
    fn test_menu_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = MenuError::from(json_err);
        assert!(err.to_string().starts_with("Invalid menu data"));
    }
}
