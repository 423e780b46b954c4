use async_trait::async_trait;
use sanduich_site::client::NotificationGateway;
use sanduich_site::error::{DispatchError, DispatchResult};
use sanduich_site::models::TemplateParams;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock notification gateway for testing.
///
/// Records every set of template parameters it is asked to send. It can be
/// told to fail, and it can hold calls in flight until the test releases them.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockGateway {
    sent: Arc<Mutex<Vec<TemplateParams>>>,
    failure: Arc<Mutex<Option<fn() -> DispatchError>>>,
    gate: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl MockGateway {
    /// A gateway that accepts everything immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every call fails with the error `make_error` builds.
    pub fn failing(make_error: fn() -> DispatchError) -> Self {
        let gateway = Self::new();
        gateway.fail_with(Some(make_error));
        gateway
    }

    /// A gateway whose calls block until [`MockGateway::release`].
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Notify::new())),
            ..Self::default()
        }
    }

    /// Change the result of subsequent calls. `None` means success.
    pub fn fail_with(&self, make_error: Option<fn() -> DispatchError>) {
        *self.failure.lock().unwrap() = make_error;
    }

    /// Let one held call complete.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<TemplateParams> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_sent(&self) -> Option<TemplateParams> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// Yield to the runtime until `count` calls have arrived.
    pub async fn wait_for_calls(&self, count: usize) {
        while self.call_count() < count {
            tokio::task::yield_now().await;
        }
    }

    pub fn as_gateway(&self) -> Arc<dyn NotificationGateway> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl NotificationGateway for MockGateway {
    async fn send(&self, params: &TemplateParams) -> DispatchResult<()> {
        self.sent.lock().unwrap().push(params.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let failure = *self.failure.lock().unwrap();
        match failure {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }
}
