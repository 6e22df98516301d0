// src/middleware/csrf.rs
use axum::http::HeaderMap;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

use crate::utils::token::generate_url_token;

const CSRF_TOKEN_LENGTH: usize = 32;
pub const CSRF_HEADER: &str = "x-csrf-token";

struct CsrfToken {
    token: String,
    issued_at: Instant,
}

/// Per-form-session CSRF tokens. The page embeds the token in a hidden input
/// and the keystroke script sends it in the `x-csrf-token` header.
#[derive(Clone)]
pub struct CsrfProtection {
    tokens: Arc<RwLock<HashMap<String, CsrfToken>>>,
    expiry: Duration,
}

impl CsrfProtection {
    pub fn new(expiry: Duration) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            expiry,
        }
    }

    pub async fn generate_token(&self, session_id: &str) -> String {
        let token = generate_url_token(CSRF_TOKEN_LENGTH);

        let csrf_token = CsrfToken {
            token: token.clone(),
            issued_at: Instant::now(),
        };
        self.tokens
            .write()
            .await
            .insert(session_id.to_string(), csrf_token);

        token
    }

    /// Checks a token in constant time. A valid token stays alive for another
    /// `expiry`, matching the idle timeout of the form it protects.
    pub async fn validate_token(&self, session_id: &str, provided_token: &str) -> bool {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(session_id) {
            Some(stored) if stored.issued_at.elapsed() <= self.expiry => {
                let valid: bool = stored.token.as_bytes().ct_eq(provided_token.as_bytes()).into();
                if valid {
                    stored.issued_at = Instant::now();
                }
                valid
            }
            _ => false,
        }
    }

    pub async fn revoke(&self, session_id: &str) {
        self.tokens.write().await.remove(session_id);
    }

    pub async fn cleanup_expired(&self) {
        let expiry = self.expiry;
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, token| token.issued_at.elapsed() < expiry);
    }
}

/// CSRF token from the request header (keystroke requests).
pub fn header_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_csrf_token_generation() {
        let csrf = CsrfProtection::new(Duration::from_secs(3600));
        let token1 = csrf.generate_token("session1").await;
        let token2 = csrf.generate_token("session2").await;

        assert_ne!(token1, token2);
        assert_eq!(token1.len(), 43); // Base64 encoded 32 bytes
    }

    #[tokio::test]
    async fn test_csrf_token_validation() {
        let csrf = CsrfProtection::new(Duration::from_secs(3600));
        let token = csrf.generate_token("session1").await;

        assert!(csrf.validate_token("session1", &token).await);
        assert!(!csrf.validate_token("session1", "wrong_token").await);
        assert!(!csrf.validate_token("wrong_session", &token).await);

        csrf.revoke("session1").await;
        assert!(!csrf.validate_token("session1", &token).await);
    }

    #[tokio::test]
    async fn test_expired_tokens_rejected_and_cleaned() {
        let csrf = CsrfProtection::new(Duration::from_millis(10));
        let token = csrf.generate_token("session1").await;

        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(!csrf.validate_token("session1", &token).await);
        csrf.cleanup_expired().await;
        assert!(csrf.tokens.read().await.is_empty());
    }

    #[test]
    fn test_header_token() {
        let mut headers = HeaderMap::new();
        assert!(header_token(&headers).is_none());

        headers.insert(CSRF_HEADER, HeaderValue::from_static("abc"));
        assert_eq!(header_token(&headers).as_deref(), Some("abc"));
    }
}
