// src/handlers/signup.rs
use axum::{
    extract::{Form, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::web::{form_cookie, FORM_COOKIE};
use crate::components::text_field::label_floats;
use crate::form::{SignUpController, SubmitOutcome};
use crate::middleware::csrf::header_token;
use crate::models::{FieldChange, FieldName};
use crate::services::form_sessions::FormHandle;
use crate::templates;
use crate::AppState;

/// Which button posted the form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormIntent {
    #[default]
    Submit,
    RevealPassword,
    RevealConfirmPassword,
    DismissErrors,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    // Browsers only send a checkbox when it is checked
    #[serde(default)]
    pub terms_accepted: Option<String>,
    #[serde(default)]
    pub intent: FormIntent,
    #[serde(default, rename = "csrf_token")]
    pub csrf_token: String,
}

impl SignUpForm {
    /// The posted values as the change intents the fields would have emitted.
    fn changes(&self) -> [FieldChange; 7] {
        [
            FieldChange::text(FieldName::FirstName, self.first_name.as_str()),
            FieldChange::text(FieldName::LastName, self.last_name.as_str()),
            FieldChange::text(FieldName::Email, self.email.as_str()),
            FieldChange::text(FieldName::Phone, self.phone.as_str()),
            FieldChange::text(FieldName::Password, self.password.as_str()),
            FieldChange::text(FieldName::ConfirmPassword, self.confirm_password.as_str()),
            FieldChange::checkbox(FieldName::TermsAccepted, self.terms_accepted.is_some()),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldInputResponse {
    pub accepted: bool,
    pub value: String,
    pub checked: bool,
    pub floated: bool,
}

async fn find_form(state: &AppState, jar: &CookieJar) -> Option<(String, FormHandle)> {
    let session_id = jar.get(FORM_COOKIE)?.value().to_string();
    let handle = state.forms.get(&session_id).await?;
    Some((session_id, handle))
}

fn apply_intent(controller: &mut SignUpController, intent: FormIntent) {
    match intent {
        FormIntent::Submit => match controller.submit() {
            SubmitOutcome::Accepted(_) => tracing::info!("Sign-up form accepted"),
            SubmitOutcome::Rejected(errors) => {
                tracing::debug!(failures = errors.len(), "Sign-up form has errors")
            }
        },
        FormIntent::RevealPassword => controller.toggle_reveal(FieldName::Password),
        FormIntent::RevealConfirmPassword => controller.toggle_reveal(FieldName::ConfirmPassword),
        FormIntent::DismissErrors => controller.dismiss_errors(),
    }
}

/// Handles every button of the form. Posted values are fed through the
/// controller like keystrokes, then the intent runs and the page is rendered
/// again in place.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignUpForm>,
) -> Result<(CookieJar, Html<String>), Response> {
    let Some((session_id, handle)) = find_form(&state, &jar).await else {
        tracing::debug!("Form post without a live session, remounting");
        return Err(Redirect::to("/signup").into_response());
    };

    if !state
        .csrf_protection
        .validate_token(&session_id, &form.csrf_token)
        .await
    {
        tracing::warn!("CSRF check failed for sign-up form post");
        return Err(StatusCode::FORBIDDEN.into_response());
    }

    let html = {
        let mut controller = handle.lock().await;
        for change in form.changes().iter() {
            controller.input(change);
        }
        apply_intent(&mut controller, form.intent);
        templates::signup::render(&controller, &form.csrf_token)
    };

    let cookie = form_cookie(session_id, state.config.form_session_idle_secs);
    Ok((jar.add(cookie), Html(html)))
}

/// Keystroke endpoint used by the page script. Answers with the stored value
/// so the input can be reset when a change is refused.
pub async fn field_input(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(change): Json<FieldChange>,
) -> Result<Json<FieldInputResponse>, StatusCode> {
    let (session_id, handle) = find_form(&state, &jar)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let token = header_token(&headers).ok_or_else(|| {
        tracing::warn!("CSRF check failed: no token on field input");
        StatusCode::FORBIDDEN
    })?;
    if !state.csrf_protection.validate_token(&session_id, &token).await {
        tracing::warn!("CSRF check failed: bad token on field input");
        return Err(StatusCode::FORBIDDEN);
    }

    let mut controller = handle.lock().await;
    let accepted = controller.input(&change);
    tracing::debug!(field = %change.field, accepted, "Field input");

    let record = controller.record();
    let value = record.text(change.field).to_string();
    Ok(Json(FieldInputResponse {
        accepted,
        floated: label_floats(false, &value),
        checked: record.terms_accepted,
        value,
    }))
}
