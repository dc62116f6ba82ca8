//! Request and response models for the lead gateway

use super::lead::{LeadFormInput, LeadSource, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/leads`: the form controls plus both dropdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRequest {
    #[serde(flatten)]
    pub form: LeadFormInput,
    pub role: Role,
    pub source: LeadSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadAccepted {
    pub submission_id: Uuid,
    pub message: String,
    pub redirect_to: String,
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}
