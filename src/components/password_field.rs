// src/components/password_field.rs
use super::text_field::{render_floating_input, FloatingInput, InputKind};
use crate::models::FieldName;
use crate::utils::validation::MAX_PASSWORD_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealIcon {
    /// Characters are masked; clicking reveals them.
    Eye,
    /// Characters are shown; clicking hides them.
    EyeOff,
}

impl RevealIcon {
    fn class(&self) -> &'static str {
        match self {
            RevealIcon::Eye => "icon-eye",
            RevealIcon::EyeOff => "icon-eye-off",
        }
    }

    fn action(&self) -> &'static str {
        match self {
            RevealIcon::Eye => "Show",
            RevealIcon::EyeOff => "Hide",
        }
    }
}

/// Password input with a show/hide toggle. The reveal flag belongs to the field
/// and only changes through [`PasswordField::toggle_reveal`].
#[derive(Debug, Clone)]
pub struct PasswordField {
    label: &'static str,
    name: FieldName,
    reveal: bool,
}

impl PasswordField {
    pub fn new(label: &'static str, name: FieldName) -> Self {
        Self {
            label,
            name,
            reveal: false,
        }
    }

    pub fn name(&self) -> FieldName {
        self.name
    }

    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    pub fn input_kind(&self) -> InputKind {
        if self.reveal {
            InputKind::Text
        } else {
            InputKind::Password
        }
    }

    pub fn toggle_icon(&self) -> RevealIcon {
        if self.reveal {
            RevealIcon::EyeOff
        } else {
            RevealIcon::Eye
        }
    }

    /// Intent value posted by this field's toggle button.
    pub fn toggle_intent(&self) -> &'static str {
        match self.name {
            FieldName::ConfirmPassword => "reveal-confirm-password",
            _ => "reveal-password",
        }
    }

    pub fn render(&self, value: &str) -> String {
        let icon = self.toggle_icon();
        let toggle = format!(
            r#"<button type="submit" name="intent" value="{intent}" class="reveal-toggle {icon}" formnovalidate aria-label="{action} {label}"></button>"#,
            intent = self.toggle_intent(),
            icon = icon.class(),
            action = icon.action(),
            label = self.label.to_lowercase(),
        );

        render_floating_input(FloatingInput {
            label: self.label,
            name: self.name,
            kind: self.input_kind(),
            value,
            max_length: Some(MAX_PASSWORD_LENGTH),
            trailing: &toggle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_masked() {
        let field = PasswordField::new("Password", FieldName::Password);
        assert_eq!(field.input_kind(), InputKind::Password);
        assert_eq!(field.toggle_icon(), RevealIcon::Eye);
    }

    #[test]
    fn test_toggle_twice_returns_to_masked() {
        let mut field = PasswordField::new("Password", FieldName::Password);

        field.toggle_reveal();
        assert_eq!(field.input_kind(), InputKind::Text);
        assert_eq!(field.toggle_icon(), RevealIcon::EyeOff);

        field.toggle_reveal();
        assert_eq!(field.input_kind(), InputKind::Password);
        assert_eq!(field.toggle_icon(), RevealIcon::Eye);
    }

    #[test]
    fn test_render_reflects_reveal_state() {
        let mut field = PasswordField::new("Confirm Password", FieldName::ConfirmPassword);

        let masked = field.render("secret");
        assert!(masked.contains(r#"type="password""#));
        assert!(masked.contains(r#"maxlength="25""#));
        assert!(masked.contains("icon-eye\""));
        assert!(masked.contains(r#"value="reveal-confirm-password""#));
        assert!(masked.contains("Show confirm password"));

        field.toggle_reveal();
        let revealed = field.render("secret");
        assert!(revealed.contains(r#"type="text""#));
        assert!(revealed.contains("icon-eye-off"));
        assert!(revealed.contains(r#"value="secret""#));
    }
}
