//! Auto-dismiss policy for terminal banners.

use std::time::Duration;

/// Default banner display window.
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(3);

/// How long terminal states stay visible before the form returns to `Idle`.
///
/// `None` means the state persists until the next submit. Validation errors
/// always persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissPolicy {
    pub success_after: Option<Duration>,
    pub dispatch_error_after: Option<Duration>,
}

impl DismissPolicy {
    /// Contact form: success clears after `window`, errors stay.
    pub fn contact(window: Duration) -> Self {
        Self {
            success_after: Some(window),
            dispatch_error_after: None,
        }
    }

    /// Newsletter forms: success and dispatch errors both clear after `window`.
    pub fn newsletter(window: Duration) -> Self {
        Self {
            success_after: Some(window),
            dispatch_error_after: Some(window),
        }
    }

    /// Nothing auto-dismisses.
    pub fn persistent() -> Self {
        Self {
            success_after: None,
            dispatch_error_after: None,
        }
    }
}

impl Default for DismissPolicy {
    fn default() -> Self {
        Self::contact(DEFAULT_DISPLAY_WINDOW)
    }
}
