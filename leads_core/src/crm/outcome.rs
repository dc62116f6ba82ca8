//! Three-way classification of a finished CRM call

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Message the CRM returns, with a success status, when the email is already on file.
pub const DUPLICATE_SENTINEL: &str = "Email Already Exist";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";
pub const TIMEOUT_MESSAGE: &str = "The request timed out, please try again";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success { message: Option<String> },
    Duplicate { message: String },
    Failure { message: String },
}

impl SubmissionOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        SubmissionOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success { .. } => "success",
            SubmissionOutcome::Duplicate { .. } => "duplicate",
            SubmissionOutcome::Failure { .. } => "failure",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }
}

/// Duplicate detection is an exact match on [`DUPLICATE_SENTINEL`]; any rewording on the
/// CRM side turns duplicates into plain successes.
pub fn classify_response(status: StatusCode, body: &[u8]) -> SubmissionOutcome {
    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(remote_message)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        return SubmissionOutcome::Failure { message };
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return SubmissionOutcome::Success { message: None };
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => match remote_message(&value) {
            Some(message) if message == DUPLICATE_SENTINEL => SubmissionOutcome::Duplicate { message },
            message => SubmissionOutcome::Success { message },
        },
        Err(err) => {
            tracing::warn!(status = status.as_u16(), "CRM returned a malformed body: {}", err);
            SubmissionOutcome::failure(GENERIC_FAILURE_MESSAGE)
        }
    }
}

fn remote_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
