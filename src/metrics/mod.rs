//! Basic metrics instrumentation.
//!
//! Counters for provider HTTP calls and for what the form controllers and the
//! partner directory do with user events.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector, cheap to clone (all counters are shared).
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made to the email provider
    http_requests_total: Arc<AtomicU64>,

    /// Total number of failed provider requests
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all provider requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Submissions that reached Success
    submissions_sent_total: Arc<AtomicU64>,

    /// Submits rejected by validation before any network call
    validation_rejections_total: Arc<AtomicU64>,

    /// Submits dropped because one was already in flight
    ignored_submits_total: Arc<AtomicU64>,

    /// Partner storefronts opened
    partner_opens_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            submissions_sent_total: Arc::new(AtomicU64::new(0)),
            validation_rejections_total: Arc::new(AtomicU64::new(0)),
            ignored_submits_total: Arc::new(AtomicU64::new(0)),
            partner_opens_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission_sent(&self) {
        self.submissions_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored_submit(&self) {
        self.ignored_submits_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_partner_open(&self) {
        self.partner_opens_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn submissions_sent_total(&self) -> u64 {
        self.submissions_sent_total.load(Ordering::Relaxed)
    }

    pub fn validation_rejections_total(&self) -> u64 {
        self.validation_rejections_total.load(Ordering::Relaxed)
    }

    pub fn ignored_submits_total(&self) -> u64 {
        self.ignored_submits_total.load(Ordering::Relaxed)
    }

    pub fn partner_opens_total(&self) -> u64 {
        self.partner_opens_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            submissions_sent_total: self.submissions_sent_total(),
            validation_rejections_total: self.validation_rejections_total(),
            ignored_submits_total: self.ignored_submits_total(),
            partner_opens_total: self.partner_opens_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub submissions_sent_total: u64,
    pub validation_rejections_total: u64,
    pub ignored_submits_total: u64,
    pub partner_opens_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
