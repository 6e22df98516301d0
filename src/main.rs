// src/main.rs
mod components;
mod config;
mod form;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod templates;
mod utils;

use crate::config::Config;
use crate::form::{SubmissionObserver, TracingObserver};
use crate::middleware::csrf::CsrfProtection;
use crate::middleware::rate_limit::RateLimiter;
use crate::routes::create_router;
use crate::services::form_sessions::FormSessions;
use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub forms: FormSessions,
    pub rate_limiter: Arc<RateLimiter>,
    pub csrf_protection: Arc<CsrfProtection>,
}

impl AppState {
    pub fn new(config: Config, observer: Arc<dyn SubmissionObserver>) -> Self {
        let idle = Duration::from_secs(config.form_session_idle_secs);

        Self {
            forms: FormSessions::new(config.form_session_capacity, idle, observer),
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max_requests,
                Duration::from_secs(config.rate_limit_window_secs),
            )),
            // Tokens live as long as an idle form may
            csrf_protection: Arc::new(CsrfProtection::new(idle)),
            config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting sign-up form server...");

    let config = Config::from_env().context("failed to load configuration")?;
    let addr = config.server_addr()?;

    let state = Arc::new(AppState::new(config, Arc::new(TracingObserver)));

    // Rate limiter cleanup task
    let rate_limiter = state.rate_limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
            tracing::debug!("Rate limiter cleanup completed");
        }
    });

    // CSRF token cleanup task
    let csrf = state.csrf_protection.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(600));
        loop {
            interval.tick().await;
            csrf.cleanup_expired().await;
            tracing::debug!("CSRF token cleanup completed");
        }
    });

    let app = create_router(state.clone());

    tracing::info!("Sign-up form listening on {}", addr);
    tracing::info!("Form: http://{}/signup", addr);
    if state.config.enable_hsts {
        tracing::info!("HSTS enabled");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
