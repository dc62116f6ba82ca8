//! The body the CRM's website-contacts endpoint expects

use super::lead::{LeadSource, Role, ValidatedLead};
use crate::validation::is_blank;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCOUNT_NAME: &str = "Actify Learning";
pub const LEARNING_ACCOUNT_CATEGORY: &str = "Actify Learning";
pub const BUSINESS_ACCOUNT_CATEGORY: &str = "Actify Business";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRemark {
    pub msg: String,
    pub enquiry_type: Role,
}

/// Snake-case wire shape of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub remark: LeadRemark,
    pub accountname: String,
    pub accname: String,
    pub date: String,
    pub time: String,
    pub source: LeadSource,
}

impl LeadSubmissionPayload {
    /// Pure mapping from a validated form to the CRM body. Dates and times are the
    /// visitor's, never the clock's.
    pub fn build(input: &ValidatedLead, role: Role, source: LeadSource) -> Self {
        Self {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone_number: input.phone_number.clone(),
            remark: LeadRemark {
                msg: input.remark.clone(),
                enquiry_type: role,
            },
            accountname: account_name(input, role),
            accname: account_category(role).to_string(),
            date: input.date.clone(),
            time: input.time.clone(),
            source,
        }
    }

    pub fn to_json_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

pub fn account_category(role: Role) -> &'static str {
    if role.is_business_owner() {
        BUSINESS_ACCOUNT_CATEGORY
    } else {
        LEARNING_ACCOUNT_CATEGORY
    }
}

fn account_name(input: &ValidatedLead, role: Role) -> String {
    if role.is_business_owner() && !is_blank(&input.account_name) {
        input.account_name.clone()
    } else {
        DEFAULT_ACCOUNT_NAME.to_string()
    }
}
