// src/handlers/mod.rs
pub mod signup;
pub mod web;
