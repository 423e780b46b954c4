//! Analytics capability.
//!
//! Tracking is fire-and-forget. The capability is optional: when none is
//! configured every `track` call is a silent no-op.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// One analytics ping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub label: String,
    pub action: String,
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(
        category: impl Into<String>,
        label: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            label: label.into(),
            action: action.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// Receives analytics events.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Writes events to the log under the `analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        tracing::info!(
            target: "analytics",
            category = %event.category,
            label = %event.label,
            action = %event.action,
            "event"
        );
    }
}

/// An optional analytics capability.
#[derive(Clone, Default)]
pub struct AnalyticsHandle(Option<Arc<dyn Analytics>>);

impl AnalyticsHandle {
    pub fn new(analytics: Arc<dyn Analytics>) -> Self {
        Self(Some(analytics))
    }

    /// No analytics configured.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Emit an event if a capability is configured.
    pub fn track(&self, category: &str, label: &str, action: &str) {
        if let Some(analytics) = &self.0 {
            analytics.track(&AnalyticsEvent::new(category, label, action));
        }
    }
}

impl From<Option<Arc<dyn Analytics>>> for AnalyticsHandle {
    fn from(analytics: Option<Arc<dyn Analytics>>) -> Self {
        Self(analytics)
    }
}

impl std::fmt::Debug for AnalyticsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AnalyticsHandle")
            .field(&self.is_enabled())
            .finish()
    }
}
