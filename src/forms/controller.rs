//! Per-form submission state machine.
//!
//! ```text
//! Idle ──submit──▶ Submitting ──invalid──▶ Error(validation)
//!                      │
//!                      ├──gateway Ok──▶ Success ──(policy)──▶ Idle
//!                      └──gateway Err─▶ Error(dispatch) ──(policy)──▶ Idle
//! ```
//!
//! Any terminal state re-enters `Submitting` on the next submit, which also
//! cancels the pending auto-dismiss timer. A submit while `Submitting` is dropped.

use super::form::SubmissionForm;
use super::policy::DismissPolicy;
use super::status::{Banner, BannerKind, FormError, SubmissionStatus, SubmitOutcome};
use crate::client::NotificationGateway;
use crate::metrics::Metrics;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;

struct ControllerState<Fields> {
    fields: Fields,
    status: SubmissionStatus,
    /// Bumped on every accepted submit; stale timers and results compare against it.
    generation: u64,
    dismiss: Option<JoinHandle<()>>,
}

impl<Fields> ControllerState<Fields> {
    fn cancel_dismiss(&mut self) {
        if let Some(handle) = self.dismiss.take() {
            handle.abort();
        }
    }
}

impl<Fields> Drop for ControllerState<Fields> {
    fn drop(&mut self) {
        self.cancel_dismiss();
    }
}

type SharedState<Fields> = Arc<Mutex<ControllerState<Fields>>>;

fn lock<Fields>(state: &Mutex<ControllerState<Fields>>) -> MutexGuard<'_, ControllerState<Fields>> {
    // Poisoning only means a panic elsewhere; the state itself is still coherent.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Returns the form to `Idle` if its submit future is dropped mid-flight.
struct InFlight<Fields> {
    state: Weak<Mutex<ControllerState<Fields>>>,
    generation: u64,
    armed: bool,
}

impl<Fields> InFlight<Fields> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<Fields> Drop for InFlight<Fields> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            let mut state = lock(&state);
            if state.generation == self.generation && state.status.is_submitting() {
                tracing::debug!("Submission abandoned before the gateway answered");
                state.status = SubmissionStatus::Idle;
            }
        }
    }
}

/// Owns one form's field state and submission lifecycle.
///
/// Clones share the same state, so a clone can be handed to a task while the
/// page keeps reading status through its own handle. The state is freed when the
/// last clone is dropped; a pending auto-dismiss timer then does nothing.
pub struct SubmissionController<F: SubmissionForm> {
    state: SharedState<F::Fields>,
    gateway: Arc<dyn NotificationGateway>,
    policy: DismissPolicy,
    to_name: Arc<str>,
    label: Arc<str>,
    metrics: Metrics,
    _form: PhantomData<fn() -> F>,
}

impl<F: SubmissionForm> Clone for SubmissionController<F> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            gateway: self.gateway.clone(),
            policy: self.policy,
            to_name: self.to_name.clone(),
            label: self.label.clone(),
            metrics: self.metrics.clone(),
            _form: PhantomData,
        }
    }
}

impl<F: SubmissionForm> SubmissionController<F> {
    /// Create a controller in `Idle` with empty fields.
    ///
    /// `to_name` is the recipient label rendered into every template.
    pub fn new(
        gateway: Arc<dyn NotificationGateway>,
        policy: DismissPolicy,
        to_name: impl Into<String>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                fields: F::Fields::default(),
                status: SubmissionStatus::Idle,
                generation: 0,
                dismiss: None,
            })),
            gateway,
            policy,
            to_name: Arc::from(to_name.into()),
            label: Arc::from(F::KIND),
            metrics: Metrics::new(),
            _form: PhantomData,
        }
    }

    /// Name this instance in logs (e.g. `footer_newsletter`).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Arc::from(label.into());
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn policy(&self) -> DismissPolicy {
        self.policy
    }

    /// Current status.
    pub fn status(&self) -> SubmissionStatus {
        lock(&self.state).status.clone()
    }

    pub fn is_submitting(&self) -> bool {
        lock(&self.state).status.is_submitting()
    }

    /// Snapshot of the field state.
    pub fn fields(&self) -> F::Fields {
        lock(&self.state).fields.clone()
    }

    /// Replace the field state. Does not touch the status.
    pub fn set_fields(&self, fields: F::Fields) {
        lock(&self.state).fields = fields;
    }

    /// Edit the field state in place, as input change events do.
    pub fn update_fields(&self, edit: impl FnOnce(&mut F::Fields)) {
        edit(&mut lock(&self.state).fields);
    }

    /// Banner for the current status, if any.
    pub fn banner(&self) -> Option<Banner> {
        match self.status() {
            SubmissionStatus::Success => Some(Banner {
                kind: BannerKind::Success,
                message: F::success_message().to_string(),
            }),
            SubmissionStatus::Error(e) => Some(Banner {
                kind: BannerKind::Error,
                message: e.to_string(),
            }),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }

    /// Handle one submit event.
    ///
    /// Validation failures return immediately without calling the gateway. The
    /// gateway call is the only await point and no lock is held across it.
    pub async fn submit(&self) -> SubmitOutcome {
        self.run_submit(None).await
    }

    /// Fill the form and submit it as one event.
    ///
    /// The fields are written only if the submit is accepted; while another
    /// submit is in flight they are discarded and its input is left alone.
    pub async fn submit_with(&self, fields: F::Fields) -> SubmitOutcome {
        self.run_submit(Some(fields)).await
    }

    async fn run_submit(&self, replacement: Option<F::Fields>) -> SubmitOutcome {
        let (generation, fields) = {
            let mut state = lock(&self.state);
            if state.status.is_submitting() {
                self.metrics.record_ignored_submit();
                tracing::debug!(form = %self.label, "Submit ignored: already submitting");
                return SubmitOutcome::Ignored;
            }
            if let Some(fields) = replacement {
                state.fields = fields;
            }
            state.cancel_dismiss();
            state.generation += 1;
            state.status = SubmissionStatus::Submitting;
            (state.generation, state.fields.clone())
        };

        let submission = match F::validate(&fields) {
            Ok(submission) => submission,
            Err(e) => {
                self.metrics.record_validation_rejection();
                tracing::debug!(
                    form = %self.label,
                    reason = %e,
                    "Submission rejected by validation"
                );
                let status = SubmissionStatus::Error(FormError::Validation(e));
                self.finish(generation, status, None, false);
                return SubmitOutcome::Rejected(e);
            }
        };

        let params = F::template_params(&submission, &self.to_name);

        let in_flight = InFlight {
            state: Arc::downgrade(&self.state),
            generation,
            armed: true,
        };
        let result = self.gateway.send(&params).await;
        in_flight.disarm();

        match result {
            Ok(()) => {
                self.metrics.record_submission_sent();
                tracing::info!(form = %self.label, "Submission sent");
                self.finish(
                    generation,
                    SubmissionStatus::Success,
                    self.policy.success_after,
                    true,
                );
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::error!(form = %self.label, error = %e, "Submission dispatch failed");
                self.finish(
                    generation,
                    SubmissionStatus::Error(FormError::Dispatch),
                    self.policy.dispatch_error_after,
                    false,
                );
                SubmitOutcome::Failed
            }
        }
    }

    /// Move to a terminal status if `generation` is still current, arming the
    /// auto-dismiss timer when `dismiss_after` is set.
    fn finish(
        &self,
        generation: u64,
        status: SubmissionStatus,
        dismiss_after: Option<Duration>,
        reset_fields: bool,
    ) {
        let mut state = lock(&self.state);
        if state.generation != generation {
            return;
        }
        state.status = status;
        if reset_fields {
            state.fields = F::Fields::default();
        }
        state.cancel_dismiss();
        if let Some(after) = dismiss_after {
            state.dismiss = Some(Self::spawn_dismiss(
                Arc::downgrade(&self.state),
                generation,
                after,
            ));
        }
    }

    fn spawn_dismiss(
        state: Weak<Mutex<ControllerState<F::Fields>>>,
        generation: u64,
        after: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = lock(&state);
            if state.generation == generation && !state.status.is_submitting() {
                state.status = SubmissionStatus::Idle;
                state.dismiss = None;
            }
        })
    }
}

impl<F: SubmissionForm> std::fmt::Debug for SubmissionController<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("label", &self.label)
            .field("status", &self.status())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Field, ValidationError};
    use crate::error::{DispatchError, DispatchResult};
    use crate::forms::{ContactForm, NewsletterForm};
    use crate::models::{ContactFields, NewsletterFields, TemplateParams};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGateway {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingGateway {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl NotificationGateway for CountingGateway {
        async fn send(&self, _params: &TemplateParams) -> DispatchResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DispatchError::Timeout)
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_required_name_skips_gateway() {
        let gateway = CountingGateway::ok();
        let form = SubmissionController::<ContactForm>::new(
            gateway.clone(),
            DismissPolicy::default(),
            "Sandüich Republic",
        );
        form.set_fields(ContactFields::new("", "a@b.com", "hi"));

        let outcome = form.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::Required(Field::Name))
        );
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert_eq!(form.banner().unwrap().message, "Name is required");
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_fields_and_dismisses() {
        let gateway = CountingGateway::ok();
        let form = SubmissionController::<ContactForm>::new(
            gateway.clone(),
            DismissPolicy::contact(Duration::from_secs(3)),
            "Sandüich Republic",
        );
        form.set_fields(ContactFields::new("Ana", "ana@example.com", "Hola"));

        assert_eq!(form.submit().await, SubmitOutcome::Sent);
        assert_eq!(form.status(), SubmissionStatus::Success);
        assert_eq!(form.fields(), ContactFields::default());

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(form.status(), SubmissionStatus::Success);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(form.status(), SubmissionStatus::Idle);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_contact_dispatch_error_persists() {
        let form = SubmissionController::<ContactForm>::new(
            CountingGateway::failing(),
            DismissPolicy::contact(Duration::from_secs(3)),
            "Sandüich Republic",
        );
        let fields = ContactFields::new("Ana", "ana@example.com", "Hola");
        form.set_fields(fields.clone());

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(form.status(), SubmissionStatus::Error(FormError::Dispatch));
        assert_eq!(form.fields(), fields);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newsletter_dispatch_error_dismisses() {
        let form = SubmissionController::<NewsletterForm>::new(
            CountingGateway::failing(),
            DismissPolicy::newsletter(Duration::from_secs(3)),
            "Sandüich Republic",
        );
        form.set_fields(NewsletterFields::new("fan@example.com"));

        assert_eq!(form.submit().await, SubmitOutcome::Failed);
        tokio::time::sleep(Duration::from_millis(3_001)).await;

        assert_eq!(form.status(), SubmissionStatus::Idle);
        // User input survives the dismissal
        assert_eq!(form.fields().email, "fan@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_validation_error_never_dismisses() {
        let form = SubmissionController::<NewsletterForm>::new(
            CountingGateway::ok(),
            DismissPolicy::newsletter(Duration::from_secs(3)),
            "Sandüich Republic",
        );
        form.set_fields(NewsletterFields::new("not-an-email"));

        form.submit().await;
        tokio::time::sleep(Duration::from_secs(30)).await;

        assert_eq!(
            form.status(),
            SubmissionStatus::Error(FormError::Validation(ValidationError::InvalidFormat(
                Field::Email
            )))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_controller_timer_is_harmless() {
        let form = SubmissionController::<NewsletterForm>::new(
            CountingGateway::ok(),
            DismissPolicy::newsletter(Duration::from_secs(3)),
            "Sandüich Republic",
        );
        form.set_fields(NewsletterFields::new("fan@example.com"));
        form.submit().await;
        drop(form);

        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}
