// src/form/mod.rs
pub mod controller;
pub mod observer;

pub use controller::{SignUpController, SubmitOutcome};
pub use observer::{SubmissionObserver, TracingObserver};
