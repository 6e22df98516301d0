// src/middleware/mod.rs
pub mod csrf;
pub mod rate_limit;
pub mod security;
