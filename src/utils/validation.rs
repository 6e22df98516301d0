// src/utils/validation.rs
use regex::Regex;

use crate::models::{ErrorMap, FieldName, FormRecord};

// Widget-enforced limits, rendered as `maxlength`
pub const MAX_NAME_LENGTH: usize = 20;
pub const MAX_PASSWORD_LENGTH: usize = 25;

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_PHONE_LENGTH: usize = 9;
pub const MAX_PHONE_LENGTH: usize = 10;

lazy_static::lazy_static! {
    static ref PHONE_INPUT_REGEX: Regex = Regex::new(r"^[0-9]*$").unwrap();
}

pub fn validate_first_name(first_name: &str) -> Result<(), &'static str> {
    if first_name.is_empty() {
        return Err("First name is required");
    }
    Ok(())
}

pub fn validate_last_name(last_name: &str) -> Result<(), &'static str> {
    if last_name.is_empty() {
        return Err("Last name is required");
    }
    Ok(())
}

/// Shape check only: anything containing an `@` passes.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.contains('@') {
        return Err("Invalid email");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.is_empty() {
        return Err("Phone is required");
    }

    let len = phone.chars().count();
    if len < MIN_PHONE_LENGTH || len > MAX_PHONE_LENGTH {
        return Err("Phone number must be 9 or 10 digits");
    }

    Ok(())
}

/// Length is counted in UTF-16 code units, the same unit the browser's
/// `maxlength` uses.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.encode_utf16().count() < MIN_PASSWORD_LENGTH {
        return Err("Password too short");
    }
    Ok(())
}

pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password != confirm {
        return Err("Passwords do not match");
    }
    Ok(())
}

pub fn validate_terms(accepted: bool) -> Result<(), &'static str> {
    if !accepted {
        return Err("Accept the terms");
    }
    Ok(())
}

/// Runs every rule against the record and collects all failures.
pub fn validate_form(record: &FormRecord) -> ErrorMap {
    let checks = [
        (FieldName::FirstName, validate_first_name(&record.first_name)),
        (FieldName::LastName, validate_last_name(&record.last_name)),
        (FieldName::Email, validate_email(&record.email)),
        (FieldName::Phone, validate_phone(&record.phone)),
        (FieldName::Password, validate_password(&record.password)),
        (
            FieldName::ConfirmPassword,
            validate_password_confirmation(&record.password, &record.confirm_password),
        ),
        (FieldName::TermsAccepted, validate_terms(record.terms_accepted)),
    ];

    checks
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|message| (field, message)))
        .collect()
}

/// Keystroke gate for the phone input: digits only, at most 10 of them.
pub fn accepts_phone_input(value: &str) -> bool {
    PHONE_INPUT_REGEX.is_match(value) && value.len() <= MAX_PHONE_LENGTH
}
