pub mod lead;
pub mod payload;
pub mod request;

pub use lead::{FormField, LeadFormInput, LeadSource, Role, ValidatedLead};
pub use payload::{LeadRemark, LeadSubmissionPayload};
pub use request::{ApiResponse, LeadAccepted, LeadRequest};
