//! HTTP client for the CRM's website-contacts endpoint

use super::outcome::{classify_response, SubmissionOutcome, GENERIC_FAILURE_MESSAGE, TIMEOUT_MESSAGE};
use crate::config::CrmConfig;
use crate::models::LeadSubmissionPayload;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("CRM request timed out after {0:?}")]
    Timeout(Duration),

    #[error("CRM request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Failed to build CRM client: {0}")]
    Client(#[source] reqwest::Error),
}

impl CrmError {
    /// Text safe to show the visitor.
    pub fn user_message(&self) -> &'static str {
        match self {
            CrmError::Timeout(_) => TIMEOUT_MESSAGE,
            CrmError::Network(_) | CrmError::Client(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<CrmError> for SubmissionOutcome {
    fn from(err: CrmError) -> Self {
        SubmissionOutcome::failure(err.user_message())
    }
}

/// Anything that can deliver a lead and report how it went. Each call is exactly one
/// delivery attempt.
#[async_trait]
pub trait LeadSubmitter: Send + Sync {
    async fn submit(&self, payload: &LeadSubmissionPayload) -> SubmissionOutcome;
}

#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    contact_url: String,
    timeout: Duration,
}

impl CrmClient {
    pub fn new(config: &CrmConfig) -> Result<Self, CrmError> {
        let timeout = config.request_timeout();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leads_core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(CrmError::Client)?;

        Ok(Self {
            http,
            contact_url: config.contact_url(),
            timeout,
        })
    }

    pub fn contact_url(&self) -> &str {
        &self.contact_url
    }

    async fn post(&self, payload: &LeadSubmissionPayload) -> Result<SubmissionOutcome, CrmError> {
        let response = self
            .http
            .post(&self.contact_url)
            .json(payload)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        debug!(status = status.as_u16(), bytes = body.len(), "CRM responded");

        Ok(classify_response(status, &body))
    }

    fn transport_error(&self, err: reqwest::Error) -> CrmError {
        if err.is_timeout() {
            CrmError::Timeout(self.timeout)
        } else {
            CrmError::Network(err)
        }
    }
}

#[async_trait]
impl LeadSubmitter for CrmClient {
    async fn submit(&self, payload: &LeadSubmissionPayload) -> SubmissionOutcome {
        match self.post(payload).await {
            Ok(outcome) => {
                info!(outcome = outcome.kind(), "CRM submission finished");
                outcome
            }
            Err(err) => {
                warn!("CRM submission failed: {}", err);
                err.into()
            }
        }
    }
}
