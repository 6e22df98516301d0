// src/middleware/rate_limit.rs
use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::handlers::web::FORM_COOKIE;

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
    max_requests: usize,
    window: Duration,
}

struct RateLimitEntry {
    count: usize,
    window_start: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitExceeded;

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub async fn check(&self, key: &str) -> Result<(), RateLimitExceeded> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        let entry = requests
            .entry(key.to_string())
            .or_insert_with(|| RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // Reset window if expired
        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            return Err(RateLimitExceeded);
        }

        entry.count += 1;
        Ok(())
    }

    /// Drops entries whose window has passed (run from a background task)
    pub async fn cleanup(&self) {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        requests.retain(|_, entry| now.duration_since(entry.window_start) <= self.window);
    }
}

/// Keystroke sync posts. They are already scoped to a live form session and
/// its CSRF token, and a user types far more characters than the form budget.
pub const UNTHROTTLED_PATHS: &[&str] = &["/signup/field"];

/// Extract client identifier from request: proxy headers, then the peer
/// address, then the form session cookie.
fn extract_client_id(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    form_cookie: &str,
) -> String {
    // Reverse proxy setups put the original client first
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    if let Some(addr) = peer {
        return addr.ip().to_string();
    }

    if let Some(session) = CookieJar::from_headers(headers).get(form_cookie) {
        return format!("form:{}", session.value());
    }

    "unknown".to_string()
}

/// Throttles form posts per client. Reads the shared limiter from request
/// extensions.
pub async fn form_rate_limit(request: Request, next: Next) -> Result<Response, StatusCode> {
    if request.method() != Method::POST || UNTHROTTLED_PATHS.contains(&request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let limiter = request
        .extensions()
        .get::<Arc<RateLimiter>>()
        .cloned()
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_id = extract_client_id(request.headers(), peer, FORM_COOKIE);

    match limiter.check(&client_id).await {
        Ok(()) => Ok(next.run(request).await),
        Err(RateLimitExceeded) => {
            tracing::warn!(
                "Rate limit exceeded for client: {} on path: {}",
                client_id,
                request.uri().path()
            );
            Err(StatusCode::TOO_MANY_REQUESTS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn test_rate_limiting() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));

        for _ in 0..5 {
            assert!(limiter.check("test_client").await.is_ok());
        }

        assert_eq!(limiter.check("test_client").await, Err(RateLimitExceeded));
        // Other clients have their own window
        assert!(limiter.check("other_client").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_reset() {
        let limiter = RateLimiter::new(2, Duration::from_millis(50));

        assert!(limiter.check("test").await.is_ok());
        assert!(limiter.check("test").await.is_ok());
        assert!(limiter.check("test").await.is_err());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(limiter.check("test").await.is_ok());
    }

    #[tokio::test]
    async fn test_cleanup_drops_stale_windows() {
        let limiter = RateLimiter::new(2, Duration::from_millis(10));
        limiter.check("test").await.unwrap();

        tokio::time::sleep(Duration::from_millis(30)).await;
        limiter.cleanup().await;

        assert!(limiter.requests.read().await.is_empty());
    }

    #[test]
    fn test_client_id_extraction() {
        let peer: SocketAddr = "192.0.2.10:51234".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(extract_client_id(&headers, None, FORM_COOKIE), "unknown");

        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("signup_form=abc123"),
        );
        assert_eq!(extract_client_id(&headers, None, FORM_COOKIE), "form:abc123");
        assert_eq!(extract_client_id(&headers, Some(peer), FORM_COOKIE), "192.0.2.10");

        headers.insert("x-real-ip", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(extract_client_id(&headers, Some(peer), FORM_COOKIE), "10.0.0.2");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(extract_client_id(&headers, Some(peer), FORM_COOKIE), "203.0.113.7");
    }
}
