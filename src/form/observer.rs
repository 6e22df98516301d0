// src/form/observer.rs
use crate::models::FormRecord;

/// Receives records that passed validation. Stands where account creation
/// would eventually be called.
pub trait SubmissionObserver: Send + Sync {
    fn accepted(&self, record: &FormRecord);
}

/// Logs accepted records. Passwords never reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SubmissionObserver for TracingObserver {
    fn accepted(&self, record: &FormRecord) {
        tracing::info!(
            first_name = %record.first_name,
            last_name = %record.last_name,
            email = %record.email,
            phone = %record.phone,
            terms_accepted = record.terms_accepted,
            "Sign-up form submitted"
        );
    }
}
