//! Field-level validation for lead submissions

pub mod rules;

pub use rules::*;

use crate::models::{LeadSource, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

/// Outcome of validating a form: every violated field mapped to its messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: HashMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: HashMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut result = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                result.add_error(&field, &message);
            }
        }

        result
    }

    /// Records a violation. Field names are reported in camelCase to match the form controls.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        let messages = self.errors.entry(camel_case(field)).or_default();
        if !messages.iter().any(|existing| existing == message) {
            messages.push(message.to_string());
        }
    }

    pub fn messages_for(&self, field: &str) -> &[String] {
        self.errors
            .get(&camel_case(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_error(&self, field: &str, message: &str) -> bool {
        self.messages_for(field).iter().any(|m| m == message)
    }
}

pub trait Validatable {
    fn validate_comprehensive(&self) -> ValidationResult;
}

impl<T> Validatable for T
where
    T: Validate,
{
    fn validate_comprehensive(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => ValidationResult::from_validation_errors(errors),
        }
    }
}

/// Selection state that lives next to the form but outside its schema.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    pub role: Role,
    pub source: LeadSource,
}

impl ValidationContext {
    pub fn new(role: Role, source: LeadSource) -> Self {
        Self { role, source }
    }
}

pub trait ContextValidatable {
    fn validate_with_context(&self, context: &ValidationContext) -> ValidationResult;
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_are_camel_cased() {
        let mut result = ValidationResult::success();
        result.add_error("phone_number", "Phone number must be between 10 and 15 digits");

        assert!(!result.is_valid);
        assert!(result.errors.contains_key("phoneNumber"));
        assert!(result.has_error("phoneNumber", "Phone number must be between 10 and 15 digits"));
        assert!(result.has_error("phone_number", "Phone number must be between 10 and 15 digits"));
    }

    #[test]
    fn test_duplicate_messages_collapse() {
        let mut result = ValidationResult::success();
        result.add_error("remark", "Remark is required");
        result.add_error("remark", "Remark is required");
        assert_eq!(result.messages_for("remark").len(), 1);
    }
}
