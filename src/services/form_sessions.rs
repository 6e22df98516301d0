// src/services/form_sessions.rs
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::form::{SignUpController, SubmissionObserver};
use crate::utils::token::{generate_session_id, is_session_id};

pub type FormHandle = Arc<Mutex<SignUpController>>;

/// Live sign-up controllers, one per mounted page. Idle sessions are dropped by
/// the cache; a page reload mounts a fresh controller.
#[derive(Clone)]
pub struct FormSessions {
    forms: Cache<String, FormHandle>,
    observer: Arc<dyn SubmissionObserver>,
}

impl FormSessions {
    pub fn new(
        capacity: u64,
        idle_timeout: Duration,
        observer: Arc<dyn SubmissionObserver>,
    ) -> Self {
        Self {
            forms: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(idle_timeout)
                .build(),
            observer,
        }
    }

    /// Creates a controller with an empty record and returns its session id.
    pub async fn mount(&self) -> (String, FormHandle) {
        let session_id = generate_session_id();
        let handle = Arc::new(Mutex::new(SignUpController::new(self.observer.clone())));
        self.forms.insert(session_id.clone(), handle.clone()).await;

        tracing::debug!("Mounted sign-up form {}", &session_id[..8]);
        (session_id, handle)
    }

    pub async fn get(&self, session_id: &str) -> Option<FormHandle> {
        if !is_session_id(session_id) {
            return None;
        }
        self.forms.get(session_id).await
    }

    pub async fn unmount(&self, session_id: &str) {
        self.forms.invalidate(session_id).await;
    }

    pub fn active_count(&self) -> u64 {
        self.forms.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TracingObserver;
    use crate::models::{FieldChange, FieldName};

    fn sessions() -> FormSessions {
        FormSessions::new(100, Duration::from_secs(60), Arc::new(TracingObserver))
    }

    #[tokio::test]
    async fn test_mount_and_lookup() {
        let sessions = sessions();
        let (id, handle) = sessions.mount().await;

        handle
            .lock()
            .await
            .input(&FieldChange::text(FieldName::FirstName, "Link"));

        let found = sessions.get(&id).await.expect("session should exist");
        assert_eq!(found.lock().await.record().first_name, "Link");
    }

    #[tokio::test]
    async fn test_remount_starts_empty() {
        let sessions = sessions();
        let (first, handle) = sessions.mount().await;
        handle
            .lock()
            .await
            .input(&FieldChange::text(FieldName::Email, "a@b"));

        let (second, fresh) = sessions.mount().await;
        assert_ne!(first, second);
        assert_eq!(fresh.lock().await.record().email, "");
    }

    #[tokio::test]
    async fn test_unknown_and_unmounted_sessions() {
        let sessions = sessions();
        assert!(sessions.get("garbage").await.is_none());
        assert!(sessions.get(&generate_session_id()).await.is_none());

        let (id, _) = sessions.mount().await;
        sessions.unmount(&id).await;
        assert!(sessions.get(&id).await.is_none());
    }
}
