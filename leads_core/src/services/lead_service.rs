use crate::{
    config::FormConfig,
    crm::{LeadSubmitter, SubmissionOutcome},
    error::{AppError, Result},
    form::{Route, SUCCESS_MESSAGE},
    metrics::SubmissionMetrics,
    middleware::logging::{redact_email, redact_phone, submission_span},
    models::{LeadAccepted, LeadRequest, LeadSubmissionPayload},
    validation::ValidationContext,
};
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Validate, shape and forward one lead per call. Nothing is kept once the call returns.
#[derive(Clone)]
pub struct LeadService {
    submitter: Arc<dyn LeadSubmitter>,
    metrics: SubmissionMetrics,
    redirect_delay_ms: u64,
}

impl LeadService {
    pub fn new(submitter: Arc<dyn LeadSubmitter>, metrics: SubmissionMetrics, form: &FormConfig) -> Self {
        Self {
            submitter,
            metrics,
            redirect_delay_ms: form.redirect_delay_ms,
        }
    }

    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    pub async fn submit_lead(&self, request: LeadRequest) -> Result<LeadAccepted> {
        let submission_id = Uuid::new_v4();
        let span = submission_span(submission_id, request.role);

        self.process(submission_id, request).instrument(span).await
    }

    async fn process(&self, submission_id: Uuid, request: LeadRequest) -> Result<LeadAccepted> {
        let LeadRequest { form, role, source } = request;

        let context = ValidationContext::new(role, source);
        let lead = form.validate_lead(&context).map_err(|errors| {
            self.metrics.record_rejected();
            let fields: Vec<&String> = errors.errors.keys().collect();
            warn!(fields = ?fields, "Lead rejected by validation");
            AppError::Validation(errors)
        })?;

        let payload = LeadSubmissionPayload::build(&lead, role, source);
        info!(
            email = %redact_email(&payload.email),
            phone = %redact_phone(&payload.phone_number),
            source = %source,
            "Forwarding lead to CRM"
        );

        let outcome = self.submitter.submit(&payload).await;
        self.metrics.record_outcome(&outcome);

        match outcome {
            SubmissionOutcome::Success { .. } => Ok(LeadAccepted {
                submission_id,
                message: SUCCESS_MESSAGE.to_string(),
                redirect_to: Route::for_role(role).path().to_string(),
                redirect_delay_ms: self.redirect_delay_ms,
            }),
            SubmissionOutcome::Duplicate { message } => {
                info!("CRM reported the email as already registered");
                Err(AppError::DuplicateLead(message))
            }
            SubmissionOutcome::Failure { message } => Err(AppError::Upstream(message)),
        }
    }
}
