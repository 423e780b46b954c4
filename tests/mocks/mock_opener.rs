use sanduich_site::partners::LinkOpener;
use std::sync::{Arc, Mutex};

/// Link opener that records URLs instead of launching a browser.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn as_opener(&self) -> Arc<dyn LinkOpener> {
        Arc::new(self.clone())
    }
}

impl LinkOpener for RecordingOpener {
    fn open_new_context(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}
