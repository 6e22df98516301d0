// src/components/text_field.rs
use crate::models::FieldName;
use crate::templates::html_escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Tel,
    Password,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Tel => "tel",
            InputKind::Password => "password",
        }
    }
}

/// The label sits above the border when the input is focused or holds a value.
pub fn label_floats(has_focus: bool, value: &str) -> bool {
    has_focus || !value.is_empty()
}

/// Controlled single-line input with a floating label. The value always comes
/// from the caller; keystrokes go back to the controller as `FieldChange`s.
#[derive(Debug, Clone)]
pub struct LabeledTextField {
    label: &'static str,
    name: FieldName,
    kind: InputKind,
    max_length: Option<usize>,
}

impl LabeledTextField {
    pub fn new(label: &'static str, name: FieldName) -> Self {
        Self {
            label,
            name,
            kind: InputKind::default(),
            max_length: None,
        }
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn name(&self) -> FieldName {
        self.name
    }

    pub fn render(&self, value: &str) -> String {
        render_floating_input(FloatingInput {
            label: self.label,
            name: self.name,
            kind: self.kind,
            value,
            max_length: self.max_length,
            trailing: "",
        })
    }
}

pub(crate) struct FloatingInput<'a> {
    pub label: &'a str,
    pub name: FieldName,
    pub kind: InputKind,
    pub value: &'a str,
    pub max_length: Option<usize>,
    /// Extra markup placed after the label, e.g. the password toggle.
    pub trailing: &'a str,
}

pub(crate) fn render_floating_input(input: FloatingInput<'_>) -> String {
    let class = if label_floats(false, input.value) {
        "floating-field has-value"
    } else {
        "floating-field"
    };
    let max_length = input
        .max_length
        .map(|n| format!(r#" maxlength="{}""#, n))
        .unwrap_or_default();

    format!(
        r#"<div class="{class}">
                <input id="{name}" name="{name}" type="{kind}" value="{value}" placeholder=" " data-field="{name}" required{max_length}>
                <label for="{name}">{label}</label>
                {trailing}
            </div>"#,
        class = class,
        name = input.name.as_str(),
        kind = input.kind.as_str(),
        value = html_escape(input.value),
        max_length = max_length,
        label = html_escape(input.label),
        trailing = input.trailing,
    )
}
