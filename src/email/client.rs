use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::templates::RenderedEmail;
use super::EmailError;
use crate::config;

/// Sender identity, resolved to a configured address at send time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromAddress {
    Welcome,
    Support,
    Noreply,
}

impl FromAddress {
    pub fn resolve(&self) -> &'static str {
        let email = &config::config().email;
        match self {
            FromAddress::Welcome => &email.from_welcome,
            FromAddress::Support => &email.from_support,
            FromAddress::Noreply => &email.from_noreply,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Thin client for the provider's `POST /emails` endpoint
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EmailClient {
    pub fn new() -> Self {
        let email = &config::config().email;
        Self {
            http: reqwest::Client::new(),
            base_url: email.api_base_url.clone(),
            api_key: email.api_key.clone(),
        }
    }

    /// Send a rendered email and return the provider's message id
    pub async fn send(
        &self,
        from: FromAddress,
        to: &str,
        email: &RenderedEmail,
    ) -> Result<String, EmailError> {
        let request = SendEmailRequest {
            from: from.resolve(),
            to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        debug!(to, subject = email.subject, "Sending email");

        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let body: SendEmailResponse = response.json().await?;
        info!(to, message_id = body.id, "Email sent");
        Ok(body.id)
    }
}

impl Default for EmailClient {
    fn default() -> Self {
        Self::new()
    }
}
