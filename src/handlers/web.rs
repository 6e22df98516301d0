// src/handlers/web.rs
use axum::{extract::State, response::Html, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use time::Duration as TimeDuration;

use crate::templates;
use crate::AppState;

pub const FORM_COOKIE: &str = "signup_form";

/// Cookie carrying the form session id. Re-issued on every render so its
/// lifetime slides with the server-side idle timeout.
pub fn form_cookie(session_id: String, idle_secs: u64) -> Cookie<'static> {
    Cookie::build((FORM_COOKIE, session_id))
        .path("/")
        .max_age(TimeDuration::seconds(i64::try_from(idle_secs).unwrap_or(i64::MAX)))
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

pub async fn index() -> Redirect {
    Redirect::to("/signup")
}

/// Mounts a fresh sign-up form. Any controller from a previous mount is dropped.
pub async fn signup_page(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    if let Some(previous) = jar.get(FORM_COOKIE) {
        state.forms.unmount(previous.value()).await;
        state.csrf_protection.revoke(previous.value()).await;
    }

    let (session_id, handle) = state.forms.mount().await;
    let csrf_token = state.csrf_protection.generate_token(&session_id).await;

    let html = {
        let controller = handle.lock().await;
        templates::signup::render(&controller, &csrf_token)
    };

    tracing::info!(active_forms = state.forms.active_count(), "Sign-up form mounted");

    let cookie = form_cookie(session_id, state.config.form_session_idle_secs);
    (jar.add(cookie), Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_cookie_attributes() {
        let cookie = form_cookie("abc".to_string(), 1800);

        assert_eq!(cookie.name(), FORM_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.max_age(), Some(TimeDuration::seconds(1800)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    }

    #[test]
    fn test_form_cookie_max_age_saturates() {
        let cookie = form_cookie("abc".to_string(), u64::MAX);
        assert_eq!(cookie.max_age(), Some(TimeDuration::seconds(i64::MAX)));
    }
}
