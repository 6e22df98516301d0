// src/components/mod.rs
pub mod password_field;
pub mod text_field;

pub use password_field::PasswordField;
pub use text_field::{InputKind, LabeledTextField};
