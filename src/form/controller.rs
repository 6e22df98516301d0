// src/form/controller.rs
use std::sync::Arc;

use super::observer::SubmissionObserver;
use crate::components::{InputKind, LabeledTextField, PasswordField};
use crate::models::{ErrorMap, FieldChange, FieldName, FormRecord};
use crate::utils::validation::{accepts_phone_input, validate_form, MAX_NAME_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(FormRecord),
    Rejected(ErrorMap),
}

/// Owns the form state for one mounted sign-up page: the record, the last
/// validation result and whether the error banner is showing.
pub struct SignUpController {
    record: FormRecord,
    errors: ErrorMap,
    errors_visible: bool,
    first_name: LabeledTextField,
    last_name: LabeledTextField,
    email: LabeledTextField,
    phone: LabeledTextField,
    password: PasswordField,
    confirm_password: PasswordField,
    observer: Arc<dyn SubmissionObserver>,
}

impl SignUpController {
    pub fn new(observer: Arc<dyn SubmissionObserver>) -> Self {
        Self {
            record: FormRecord::default(),
            errors: ErrorMap::new(),
            errors_visible: false,
            first_name: LabeledTextField::new("First Name", FieldName::FirstName)
                .max_length(MAX_NAME_LENGTH),
            last_name: LabeledTextField::new("Last Name", FieldName::LastName)
                .max_length(MAX_NAME_LENGTH),
            email: LabeledTextField::new("Email", FieldName::Email).kind(InputKind::Email),
            phone: LabeledTextField::new("Phone Number", FieldName::Phone).kind(InputKind::Tel),
            password: PasswordField::new("Password", FieldName::Password),
            confirm_password: PasswordField::new("Confirm Password", FieldName::ConfirmPassword),
            observer,
        }
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn errors_visible(&self) -> bool {
        self.errors_visible
    }

    /// Text fields in layout order, two per row.
    pub fn text_field_rows(&self) -> [[&LabeledTextField; 2]; 2] {
        [
            [&self.first_name, &self.last_name],
            [&self.email, &self.phone],
        ]
    }

    pub fn password_fields(&self) -> [&PasswordField; 2] {
        [&self.password, &self.confirm_password]
    }

    /// Replaces the record with one differing only in the changed field.
    pub fn update_field(&mut self, change: &FieldChange) {
        self.record = self.record.with_change(change);
    }

    /// Entry point for keystrokes. Phone changes pass through the input gate;
    /// a rejected change leaves the record as it was.
    pub fn input(&mut self, change: &FieldChange) -> bool {
        if change.field == FieldName::Phone && !accepts_phone_input(&change.value) {
            tracing::debug!("Rejected phone input");
            return false;
        }

        self.update_field(change);
        true
    }

    pub fn validate(&mut self) -> ErrorMap {
        let errors = validate_form(&self.record);
        self.errors_visible = !errors.is_empty();
        self.errors = errors.clone();
        errors
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = self.validate();
        if !errors.is_empty() {
            tracing::debug!(failures = errors.len(), "Sign-up form rejected");
            return SubmitOutcome::Rejected(errors);
        }

        self.observer.accepted(&self.record);
        SubmitOutcome::Accepted(self.record.clone())
    }

    /// Hides the banner. Recorded errors and field values stay as they are.
    pub fn dismiss_errors(&mut self) {
        self.errors_visible = false;
    }

    pub fn toggle_reveal(&mut self, field: FieldName) {
        match field {
            FieldName::Password => self.password.toggle_reveal(),
            FieldName::ConfirmPassword => self.confirm_password.toggle_reveal(),
            other => tracing::debug!("No reveal toggle on field {}", other),
        }
    }
}
