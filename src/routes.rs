// src/routes.rs
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use crate::handlers::{signup, web};
use crate::middleware::rate_limit::form_rate_limit;
use crate::middleware::security::{security_headers, SecurityPolicy};
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let policy = SecurityPolicy {
        enable_hsts: state.config.enable_hsts,
    };

    Router::new()
        .route("/", get(web::index))
        .route("/signup", get(web::signup_page).post(signup::submit_form))
        .route("/signup/field", post(signup::field_input))
        .route("/health", get(health_check))
        .route_layer(axum::middleware::from_fn(form_rate_limit))
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .with_state(state.clone())
        .layer(Extension(state.rate_limiter.clone()))
        .layer(axum::middleware::from_fn_with_state(policy, security_headers))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub active_forms: u64,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_forms: state.forms.active_count(),
    })
}
