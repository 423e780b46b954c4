use sanduich_site::partners::{Analytics, AnalyticsEvent, AnalyticsHandle};
use std::sync::{Arc, Mutex};

/// Analytics sink that keeps every event for later assertions.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

#[allow(dead_code)]
impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap().clone()
    }

    /// (category, label, action) triples in arrival order.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.category.clone(), e.label.clone(), e.action.clone()))
            .collect()
    }

    pub fn handle(&self) -> AnalyticsHandle {
        AnalyticsHandle::new(Arc::new(self.clone()))
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
