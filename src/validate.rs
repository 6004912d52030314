//! Field parsers used by the prompts.
//!
//! Every parser is a pure `fn(&str) -> Result<T, ValidationError>` so the
//! retry loops in [`crate::console`] can stay free of any field-specific logic.

use crate::error::ValidationError;

/// Longest first name, last name or company name the schema holds.
pub const MAX_NAME_LEN: usize = 30;

/// Longest phone number accepted, in digits.
pub const MAX_PHONE_DIGITS: usize = 10;

pub fn parse_integer(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::NotANumber(raw.to_string()))
}

/// A whole number greater than zero, e.g. K for a top-K report.
pub fn parse_count(raw: &str) -> Result<i64, ValidationError> {
    let value = parse_integer(raw)?;
    if value < 1 {
        return Err(ValidationError::NotPositive(value));
    }
    Ok(value)
}

pub fn parse_phone(raw: &str) -> Result<i64, ValidationError> {
    let digits = raw.trim();
    if digits.is_empty()
        || digits.len() > MAX_PHONE_DIGITS
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::Phone);
    }
    digits.parse::<i64>().map_err(|_| ValidationError::Phone)
}

/// Names are stored as entered; only the length is checked.
pub fn parse_name(raw: &str) -> Result<String, ValidationError> {
    let len = raw.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ValidationError::Length {
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok(raw.to_string())
}

pub fn parse_required(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(raw.to_string())
}

/// Accepts anything, including the empty string.
pub fn parse_text(raw: &str) -> Result<String, ValidationError> {
    Ok(raw.to_string())
}

pub fn parse_yes_no(raw: &str) -> Result<bool, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(ValidationError::YesNo),
    }
}

/// Accepts exactly one of the stored labels, so the answer is kept as typed.
pub fn parse_gender(raw: &str) -> Result<String, ValidationError> {
    match raw {
        "Male" | "Female" | "Other" => Ok(raw.to_string()),
        _ => Err(ValidationError::Gender),
    }
}
