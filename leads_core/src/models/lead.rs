//! Lead form state and its selection fields

use crate::validation::{
    is_blank, validate_clock_time, validate_email, validate_iso_date, validate_phone_digits,
    ContextValidatable, Validatable, ValidationContext, ValidationResult, COMPANY_NAME_MESSAGE,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use validator::Validate;

/// What the visitor says they are. Drives enquiry type, account category and redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "Job seeker")]
    JobSeeker,
    #[serde(rename = "Business Owner", alias = "Bussiness Owner")]
    BusinessOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unset => "",
            Role::Student => "student",
            Role::JobSeeker => "Job seeker",
            Role::BusinessOwner => "Business Owner",
        }
    }

    pub fn is_business_owner(&self) -> bool {
        matches!(self, Role::BusinessOwner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Role::Unset),
            "student" => Ok(Role::Student),
            "Job seeker" => Ok(Role::JobSeeker),
            "Business Owner" | "Bussiness Owner" => Ok(Role::BusinessOwner),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Where the visitor heard about us. Forwarded to the CRM untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "Pillar near station")]
    PillarNearStation,
    #[serde(rename = "Pamphlet in Newspaper")]
    PamphletInNewspaper,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Unset => "",
            LeadSource::PillarNearStation => "Pillar near station",
            LeadSource::PamphletInNewspaper => "Pamphlet in Newspaper",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(LeadSource::Unset),
            "Pillar near station" => Ok(LeadSource::PillarNearStation),
            "Pamphlet in Newspaper" => Ok(LeadSource::PamphletInNewspaper),
            other => Err(format!("Unknown source: {}", other)),
        }
    }
}

/// Raw values of the contact form controls, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadFormInput {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,

    pub last_name: String,

    #[validate(custom(function = "validate_email"))]
    pub email: String,

    #[validate(
        custom(function = "validate_phone_digits"),
        length(min = 10, max = 15, message = "Phone number must be between 10 and 15 digits")
    )]
    pub phone_number: String,

    #[validate(length(min = 1, message = "Remark is required"))]
    pub remark: String,

    pub account_name: String,

    #[validate(
        length(min = 1, message = "Date is required"),
        custom(function = "validate_iso_date")
    )]
    pub date: String,

    #[validate(
        length(min = 1, message = "Time is required"),
        custom(function = "validate_clock_time")
    )]
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    Remark,
    AccountName,
    Date,
    Time,
}

impl FormField {
    /// The control's name, which is also the key validation errors are reported under.
    pub fn name(&self) -> &'static str {
        match self {
            FormField::FirstName => "firstName",
            FormField::LastName => "lastName",
            FormField::Email => "email",
            FormField::PhoneNumber => "phoneNumber",
            FormField::Remark => "remark",
            FormField::AccountName => "accountName",
            FormField::Date => "date",
            FormField::Time => "time",
        }
    }
}

impl LeadFormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::PhoneNumber => &self.phone_number,
            FormField::Remark => &self.remark,
            FormField::AccountName => &self.account_name,
            FormField::Date => &self.date,
            FormField::Time => &self.time,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::FirstName => self.first_name = value,
            FormField::LastName => self.last_name = value,
            FormField::Email => self.email = value,
            FormField::PhoneNumber => self.phone_number = value,
            FormField::Remark => self.remark = value,
            FormField::AccountName => self.account_name = value,
            FormField::Date => self.date = value,
            FormField::Time => self.time = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Runs the schema and cross-field rules, handing back a lead that is safe to transform.
    pub fn validate_lead(&self, context: &ValidationContext) -> Result<ValidatedLead, ValidationResult> {
        let result = self.validate_with_context(context);
        if result.is_valid {
            Ok(ValidatedLead(self.clone()))
        } else {
            Err(result)
        }
    }
}

impl ContextValidatable for LeadFormInput {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult {
        let mut result = self.validate_comprehensive();

        if context.role.is_business_owner() && is_blank(&self.account_name) {
            result.add_error("account_name", COMPANY_NAME_MESSAGE);
        }

        result
    }
}

/// A form that passed validation. Only [`LeadFormInput::validate_lead`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLead(pub(super) LeadFormInput);

impl Deref for ValidatedLead {
    type Target = LeadFormInput;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
