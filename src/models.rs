// src/models.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field-to-message map produced by a validation pass. Only failing fields are present.
pub type ErrorMap = BTreeMap<FieldName, &'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    FirstName,
    LastName,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    TermsAccepted,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::FirstName,
        FieldName::LastName,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Password,
        FieldName::ConfirmPassword,
        FieldName::TermsAccepted,
    ];

    /// Name used for the `name`/`id` attributes and in JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::FirstName => "firstName",
            FieldName::LastName => "lastName",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
            FieldName::TermsAccepted => "termsAccepted",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown form field: {}", s))
    }
}

/// A change intent emitted by a field component. Mirrors an input event target:
/// text inputs carry `value`, the checkbox carries `checked`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldChange {
    pub field: FieldName,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
}

impl FieldChange {
    pub fn text(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            checked: false,
        }
    }

    pub fn checkbox(field: FieldName, checked: bool) -> Self {
        Self {
            field,
            value: String::new(),
            checked,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl FormRecord {
    /// Builds a new record equal to `self` except for the field named by `change`.
    pub fn with_change(&self, change: &FieldChange) -> FormRecord {
        let mut next = self.clone();
        match change.field {
            FieldName::FirstName => next.first_name = change.value.clone(),
            FieldName::LastName => next.last_name = change.value.clone(),
            FieldName::Email => next.email = change.value.clone(),
            FieldName::Phone => next.phone = change.value.clone(),
            FieldName::Password => next.password = change.value.clone(),
            FieldName::ConfirmPassword => next.confirm_password = change.value.clone(),
            FieldName::TermsAccepted => next.terms_accepted = change.checked,
        }
        next
    }

    /// Current text of a string field. The checkbox has no text and yields "".
    pub fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::FirstName => &self.first_name,
            FieldName::LastName => &self.last_name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Password => &self.password,
            FieldName::ConfirmPassword => &self.confirm_password,
            FieldName::TermsAccepted => "",
        }
    }
}
