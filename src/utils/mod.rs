// src/utils/mod.rs
pub mod token;
pub mod validation;
