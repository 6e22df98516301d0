// src/services/mod.rs
pub mod form_sessions;
