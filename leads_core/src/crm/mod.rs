//! Outbound side of the pipeline: the CRM website-contacts endpoint

pub mod client;
pub mod outcome;

pub use client::{CrmClient, CrmError, LeadSubmitter};
pub use outcome::{
    classify_response, SubmissionOutcome, DUPLICATE_SENTINEL, GENERIC_FAILURE_MESSAGE,
    TIMEOUT_MESSAGE,
};
