//! Validation rules and custom validators

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const FIRST_NAME_MESSAGE: &str = "First name must be at least 2 characters";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_DIGITS_MESSAGE: &str = "Phone number must contain only digits";
pub const PHONE_LENGTH_MESSAGE: &str = "Phone number must be between 10 and 15 digits";
pub const REMARK_MESSAGE: &str = "Remark is required";
pub const DATE_REQUIRED_MESSAGE: &str = "Date is required";
pub const DATE_FORMAT_MESSAGE: &str = "Date must be a valid calendar date (YYYY-MM-DD)";
pub const TIME_REQUIRED_MESSAGE: &str = "Time is required";
pub const TIME_FORMAT_MESSAGE: &str = "Time must be a valid 24-hour time (HH:MM)";
pub const COMPANY_NAME_MESSAGE: &str = "Company name is required for business enquiries";

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$"
    ).unwrap();

    static ref DIGITS_REGEX: Regex = Regex::new(r"^[0-9]*$").unwrap();
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.len() > 254 || !EMAIL_REGEX.is_match(email) {
        return Err(rule_error("email", EMAIL_MESSAGE));
    }

    Ok(())
}

/// Length is checked separately, so an empty value passes here.
pub fn validate_phone_digits(phone: &str) -> Result<(), ValidationError> {
    if !DIGITS_REGEX.is_match(phone) {
        return Err(rule_error("phone_digits", PHONE_DIGITS_MESSAGE));
    }

    Ok(())
}

pub fn validate_iso_date(date: &str) -> Result<(), ValidationError> {
    if date.is_empty() {
        return Ok(());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| rule_error("date_format", DATE_FORMAT_MESSAGE))
}

pub fn validate_clock_time(time: &str) -> Result<(), ValidationError> {
    if time.is_empty() {
        return Ok(());
    }

    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map(|_| ())
        .map_err(|_| rule_error("time_format", TIME_FORMAT_MESSAGE))
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
