//! In-process email templates. Each builder returns the full subject,
//! HTML body, and plain-text body so the client stays format-agnostic.

use serde_json::Value;

use super::EmailError;
use crate::config;

#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Link a new admin follows to set their first password
pub fn activation_url(token: &str) -> String {
    format!(
        "{}/activate-account?token={}",
        config::config().server.frontend_url,
        token
    )
}

pub fn dashboard_url() -> String {
    format!("{}/dashboard", config::config().server.frontend_url)
}

fn company_name() -> &'static str {
    &config::config().email.company_name
}

fn support_email() -> &'static str {
    &config::config().email.support_email
}

fn footer_html() -> String {
    format!(
        "<p style=\"color:#888;font-size:12px\">Questions? Contact us at {}</p>",
        support_email()
    )
}

pub fn welcome(user_name: &str, action_url: Option<&str>) -> RenderedEmail {
    let company = company_name();
    let action_url = action_url.map(str::to_string).unwrap_or_else(dashboard_url);

    RenderedEmail {
        subject: format!("Welcome to {company}!"),
        html: format!(
            "<h1>Welcome, {user_name}!</h1>\
             <p>Your account on {company} is ready.</p>\
             <p><a href=\"{action_url}\">Get started</a></p>{footer}",
            footer = footer_html()
        ),
        text: format!(
            "Welcome, {user_name}!\n\n\
             Your account on {company} is ready.\n\
             Get started: {action_url}\n\n\
             Questions? Contact us at {support}",
            support = support_email()
        ),
    }
}

pub fn school_welcome(school_name: &str, owner_name: &str, activation_url: &str) -> RenderedEmail {
    let company = company_name();

    RenderedEmail {
        subject: format!("Welcome to {company} - {school_name}!"),
        html: format!(
            "<h1>Welcome aboard, {owner_name}!</h1>\
             <p>{school_name} has been registered on {company}.</p>\
             <p>Activate your administrator account to finish setup. \
             The link below expires in 1 hour.</p>\
             <p><a href=\"{activation_url}\">Activate your account</a></p>{footer}",
            footer = footer_html()
        ),
        text: format!(
            "Welcome aboard, {owner_name}!\n\n\
             {school_name} has been registered on {company}.\n\
             Activate your administrator account to finish setup. \
             The link below expires in 1 hour.\n\n\
             {activation_url}\n\n\
             Questions? Contact us at {support}",
            support = support_email()
        ),
    }
}

pub fn password_reset(user_name: &str, reset_url: &str, expiration_time: &str) -> RenderedEmail {
    RenderedEmail {
        subject: "Password Reset Request".to_string(),
        html: format!(
            "<h1>Hi {user_name},</h1>\
             <p>We received a request to reset your password. \
             This link expires in {expiration_time}.</p>\
             <p><a href=\"{reset_url}\">Reset your password</a></p>\
             <p>If you didn't request this, you can ignore this email.</p>{footer}",
            footer = footer_html()
        ),
        text: format!(
            "Hi {user_name},\n\n\
             We received a request to reset your password. \
             This link expires in {expiration_time}.\n\n\
             {reset_url}\n\n\
             If you didn't request this, you can ignore this email.\n\n\
             Questions? Contact us at {support}",
            support = support_email()
        ),
    }
}

pub fn notification(
    title: &str,
    message: &str,
    user_name: &str,
    action_url: Option<&str>,
    action_button_text: &str,
) -> RenderedEmail {
    let action_html = action_url
        .map(|url| format!("<p><a href=\"{url}\">{action_button_text}</a></p>"))
        .unwrap_or_default();
    let action_text = action_url
        .map(|url| format!("\n{action_button_text}: {url}\n"))
        .unwrap_or_default();

    RenderedEmail {
        subject: title.to_string(),
        html: format!(
            "<h1>{title}</h1>\
             <p>Hi {user_name},</p>\
             <p>{message}</p>{action_html}{footer}",
            footer = footer_html()
        ),
        text: format!(
            "{title}\n\n\
             Hi {user_name},\n\n\
             {message}\n{action_text}\n\
             Questions? Contact us at {support}",
            support = support_email()
        ),
    }
}

/// Render a template by name with loosely-typed data. Used by the generic
/// templated-email job where the caller picks the template at runtime.
pub fn render_named(name: &str, subject: &str, data: &Value) -> Result<RenderedEmail, EmailError> {
    let str_field = |key: &str| data.get(key).and_then(Value::as_str).unwrap_or_default();

    let mut rendered = match name {
        "welcome" => welcome(
            str_field("user_name"),
            data.get("action_url").and_then(Value::as_str),
        ),
        "school-welcome" => school_welcome(
            str_field("school_name"),
            str_field("owner_name"),
            str_field("activation_url"),
        ),
        "password-reset" => {
            let expiration = data
                .get("expiration_time")
                .and_then(Value::as_str)
                .unwrap_or("1 hour");
            password_reset(str_field("user_name"), str_field("reset_url"), expiration)
        }
        "notification" => notification(
            str_field("title"),
            str_field("message"),
            str_field("user_name"),
            data.get("action_url").and_then(Value::as_str),
            data.get("action_button_text")
                .and_then(Value::as_str)
                .unwrap_or("Take Action"),
        ),
        other => return Err(EmailError::UnknownTemplate(other.to_string())),
    };

    if !subject.is_empty() {
        rendered.subject = subject.to_string();
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn welcome_includes_name_and_default_dashboard_link() {
        let email = welcome("Jamie", None);
        assert!(email.subject.starts_with("Welcome to "));
        assert!(email.html.contains("Jamie"));
        assert!(email.text.contains("/dashboard"));
    }

    #[test]
    fn school_welcome_carries_activation_link() {
        let url = activation_url("abc123def456");
        let email = school_welcome("Hilltop Montessori", "Sam Rivera", &url);
        assert!(email.subject.contains("Hilltop Montessori"));
        assert!(email.html.contains("token=abc123def456"));
        assert!(email.text.contains("token=abc123def456"));
        assert!(email.html.contains("expires in 1 hour"));
    }

    #[test]
    fn password_reset_mentions_expiration() {
        let email = password_reset("Sam", "https://app.test/reset?token=t", "1 hour");
        assert_eq!(email.subject, "Password Reset Request");
        assert!(email.text.contains("expires in 1 hour"));
    }

    #[test]
    fn notification_omits_action_when_no_url() {
        let email = notification("Term starts soon", "Classes begin Monday.", "Sam", None, "Go");
        assert!(!email.html.contains("<a href"));
        assert!(email.text.contains("Classes begin Monday."));
    }

    #[test]
    fn render_named_rejects_unknown_template() {
        let result = render_named("invoice", "Subject", &json!({}));
        assert!(matches!(result, Err(EmailError::UnknownTemplate(_))));
    }

    #[test]
    fn render_named_subject_override() {
        let email = render_named("welcome", "Custom subject", &json!({"user_name": "A"})).unwrap();
        assert_eq!(email.subject, "Custom subject");
    }
}
