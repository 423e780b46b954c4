//! Submission status and the user-facing messages derived from it.

use crate::domain::ValidationError;
use serde::Serialize;
use std::fmt;

/// Shown for every dispatch failure; the underlying cause is only logged.
pub const DISPATCH_FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact us directly.";

/// Why a form is in the `Error` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Rejected locally; no network call was made.
    Validation(ValidationError),

    /// The gateway reported a failure.
    Dispatch,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "{}", e),
            Self::Dispatch => write!(f, "{}", DISPATCH_FAILURE_MESSAGE),
        }
    }
}

/// Lifecycle of one form instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(FormError),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Short machine-readable state name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error(_) => "error",
        }
    }
}

/// Banner tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// What the page shows under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

/// Result of one submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submit was already in flight; this one was dropped.
    Ignored,

    /// Validation failed; the gateway was not called.
    Rejected(ValidationError),

    /// The gateway accepted the message.
    Sent,

    /// The gateway failed; fields were kept for another attempt.
    Failed,
}
