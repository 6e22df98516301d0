// src/templates/signup.rs
use super::{html_escape, render_page};
use crate::form::SignUpController;
use crate::models::{ErrorMap, FieldName};

pub const FORM_ID: &str = "signup-form";

const SOCIAL_PROVIDERS: [&str; 3] = ["Facebook", "Google", "Apple"];

pub fn render(controller: &SignUpController, csrf_token: &str) -> String {
    let record = controller.record();

    let rows: String = controller
        .text_field_rows()
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|field| field.render(record.text(field.name())))
                .collect();
            format!(r#"<div class="field-row">{}</div>"#, cells)
        })
        .collect();

    let passwords: String = controller
        .password_fields()
        .iter()
        .map(|field| field.render(record.text(field.name())))
        .collect();

    let banner = if controller.errors_visible() {
        render_error_banner(controller.errors())
    } else {
        String::new()
    };

    let content = format!(
        r##"
    <div class="signup">
        <div class="signup-illustration" aria-hidden="true"></div>
        <div class="signup-panel">
            <div class="signup-logo" aria-hidden="true"></div>
            <h2>Sign up</h2>
            <p class="signup-intro">Let's get you all set up so you can access your personal account.</p>

            <form id="{form_id}" class="signup-form" method="POST" action="/signup">
                <button type="submit" name="intent" value="submit" class="default-submit" tabindex="-1" aria-hidden="true"></button>
                <input type="hidden" name="csrf_token" value="{csrf}">
                {rows}
                {passwords}
                <div class="terms">
                    <input type="checkbox" id="termsAccepted" name="termsAccepted" data-field="termsAccepted"{checked}>
                    <label for="termsAccepted">I agree to all the <span class="accent">Terms</span> and <span class="accent">Privacy Policies</span></label>
                </div>
                <button type="submit" name="intent" value="submit" class="btn btn-primary btn-full">Create account</button>
                <p class="signup-footer">Already have an account? <a href="#" class="accent">Login</a></p>
            </form>

            {social}
        </div>
        {banner}
    </div>
    "##,
        form_id = FORM_ID,
        csrf = html_escape(csrf_token),
        rows = rows,
        passwords = passwords,
        checked = if record.terms_accepted { " checked" } else { "" },
        social = render_social_buttons(),
        banner = banner,
    );

    render_page("Sign up", &content)
}

/// Dismissible summary of the current validation failures, in field order.
fn render_error_banner(errors: &ErrorMap) -> String {
    if errors.is_empty() {
        return String::new();
    }

    let items: String = FieldName::ALL
        .iter()
        .filter_map(|field| errors.get(field))
        .map(|message| format!("<li>{}</li>", html_escape(message)))
        .collect();

    format!(
        r#"<div class="error-banner" role="alert">
            <ul>{items}</ul>
            <button type="submit" form="{form_id}" name="intent" value="dismiss-errors" class="error-dismiss" formnovalidate aria-label="Close error popup">&times;</button>
        </div>"#,
        items = items,
        form_id = FORM_ID,
    )
}

fn render_social_buttons() -> String {
    let buttons: String = SOCIAL_PROVIDERS
        .iter()
        .map(|provider| {
            format!(
                r#"<button type="button" class="social-button social-{}" aria-label="Sign up with {}"></button>"#,
                provider.to_lowercase(),
                provider
            )
        })
        .collect();

    format!(
        r#"<div class="social-signup">
                <div class="divider"><span>Or Sign up with</span></div>
                <div class="social-buttons">{}</div>
            </div>"#,
        buttons
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TracingObserver;
    use crate::models::FieldChange;
    use std::sync::Arc;

    fn controller() -> SignUpController {
        SignUpController::new(Arc::new(TracingObserver))
    }

    #[test]
    fn test_renders_all_fields() {
        let html = render(&controller(), "token");

        for field in FieldName::ALL {
            assert!(
                html.contains(&format!(r#"name="{}""#, field.as_str())),
                "missing {}",
                field
            );
        }
        assert!(html.contains(r#"name="csrf_token" value="token""#));
        assert!(html.contains("Create account"));
        assert!(html.contains(r##"<a href="#" class="accent">Login</a>"##));
        assert!(html.contains("Sign up with Google"));
        assert!(!html.contains("error-banner"));
    }

    #[test]
    fn test_renders_current_values() {
        let mut controller = controller();
        controller.input(&FieldChange::text(FieldName::LastName, "Hylian"));
        controller.input(&FieldChange::checkbox(FieldName::TermsAccepted, true));

        let html = render(&controller, "token");
        assert!(html.contains(r#"value="Hylian""#));
        assert!(html.contains(r#"data-field="termsAccepted" checked"#));
    }

    #[test]
    fn test_banner_follows_visibility() {
        let mut controller = controller();
        controller.submit();

        let html = render(&controller, "token");
        assert!(html.contains("error-banner"));
        assert!(html.contains("<li>First name is required</li>"));
        assert!(html.contains("<li>Accept the terms</li>"));

        controller.dismiss_errors();
        let html = render(&controller, "token");
        assert!(!html.contains("error-banner"));
    }

    #[test]
    fn test_banner_lists_in_field_order() {
        let mut controller = controller();
        controller.submit();

        let html = render(&controller, "token");
        let first = html.find("First name is required").unwrap();
        let terms = html.find("Accept the terms").unwrap();
        assert!(first < terms);
    }
}
