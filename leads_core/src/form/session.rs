//! One contact-form instance and its submit lifecycle

use super::dispatch::{Navigator, Notifier, OutcomeDispatcher};
use super::navigation::ScheduledNavigation;
use crate::config::FormConfig;
use crate::crm::{LeadSubmitter, SubmissionOutcome};
use crate::middleware::logging::submission_span;
use crate::models::{FormField, LeadFormInput, LeadSource, LeadSubmissionPayload, Role};
use crate::validation::{ValidationContext, ValidationResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Blocked before any network call; every offending field is listed.
    Invalid(ValidationResult),
    /// A previous submit is still waiting on the CRM.
    AlreadySubmitting,
    Completed(SubmissionOutcome),
}

#[derive(Debug, Default)]
struct FormState {
    input: LeadFormInput,
    role: Role,
    source: LeadSource,
    errors: ValidationResult,
}

/// Clears the submitting flag however the submit future ends, cancellation included.
struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct LeadForm {
    state: Mutex<FormState>,
    submitting: AtomicBool,
    submitter: Arc<dyn LeadSubmitter>,
    dispatcher: OutcomeDispatcher,
    pending_navigation: Mutex<Option<ScheduledNavigation>>,
}

impl LeadForm {
    pub fn new(
        submitter: Arc<dyn LeadSubmitter>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        config: &FormConfig,
    ) -> Self {
        Self {
            state: Mutex::new(FormState {
                errors: ValidationResult::success(),
                ..FormState::default()
            }),
            submitting: AtomicBool::new(false),
            submitter,
            dispatcher: OutcomeDispatcher::new(notifier, navigator, config.redirect_delay()),
            pending_navigation: Mutex::new(None),
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.state.lock().input.set(field, value);
    }

    pub fn field(&self, field: FormField) -> String {
        self.state.lock().input.get(field).to_string()
    }

    pub fn set_role(&self, role: Role) {
        self.state.lock().role = role;
    }

    pub fn role(&self) -> Role {
        self.state.lock().role
    }

    pub fn set_source(&self, source: LeadSource) {
        self.state.lock().source = source;
    }

    pub fn source(&self) -> LeadSource {
        self.state.lock().source
    }

    pub fn input(&self) -> LeadFormInput {
        self.state.lock().input.clone()
    }

    /// The company-name control only exists for business owners.
    pub fn shows_company_name(&self) -> bool {
        self.role().is_business_owner()
    }

    /// Errors from the last rejected submit, keyed by camelCase field name.
    pub fn errors(&self) -> ValidationResult {
        self.state.lock().errors.clone()
    }

    /// Messages to render under one control.
    pub fn field_errors(&self, field: FormField) -> Vec<String> {
        self.state.lock().errors.messages_for(field.name()).to_vec()
    }

    /// Drives the disabled state of the submit button.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn has_pending_navigation(&self) -> bool {
        self.pending_navigation
            .lock()
            .as_ref()
            .map(|pending| !pending.is_finished())
            .unwrap_or(false)
    }

    pub async fn submit(&self) -> SubmitResult {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Submit ignored, previous submission still in flight");
            return SubmitResult::AlreadySubmitting;
        }
        let _guard = SubmittingGuard(&self.submitting);

        let (input, role, source) = {
            let state = self.state.lock();
            (state.input.clone(), state.role, state.source)
        };

        let context = ValidationContext::new(role, source);
        let lead = match input.validate_lead(&context) {
            Ok(lead) => lead,
            Err(errors) => {
                debug!(fields = errors.errors.len(), "Form rejected by validation");
                self.state.lock().errors = errors.clone();
                return SubmitResult::Invalid(errors);
            }
        };
        self.state.lock().errors = ValidationResult::success();

        let payload = LeadSubmissionPayload::build(&lead, role, source);
        let span = submission_span(Uuid::new_v4(), role);
        let outcome = async {
            info!("Submitting contact form");
            self.submitter.submit(&payload).await
        }
        .instrument(span)
        .await;

        if outcome.is_success() {
            self.state.lock().input = LeadFormInput::default();
        }

        if let Some(navigation) = self.dispatcher.dispatch(&outcome, role) {
            self.pending_navigation.lock().replace(navigation);
        }

        SubmitResult::Completed(outcome)
    }

    /// Called when the hosting view goes away. A redirect still waiting is dropped.
    pub fn teardown(&self) {
        if let Some(pending) = self.pending_navigation.lock().take() {
            pending.cancel();
        }
    }
}

impl Drop for LeadForm {
    fn drop(&mut self) {
        self.teardown();
    }
}
