//! Job handlers for the queue worker. Each handler owns one job type and
//! deserializes its payload into a typed struct before doing any work.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::worker::JobHandler;
use crate::email::{templates, EmailClient, FromAddress};

#[derive(Debug, Deserialize)]
struct WelcomeEmailJob {
    email: String,
    user_name: String,
    #[serde(default)]
    action_url: Option<String>,
}

pub struct WelcomeEmailHandler {
    client: EmailClient,
}

impl WelcomeEmailHandler {
    pub fn new(client: EmailClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobHandler for WelcomeEmailHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        let job: WelcomeEmailJob = serde_json::from_value(data)?;
        let email = templates::welcome(&job.user_name, job.action_url.as_deref());
        self.client
            .send(FromAddress::Welcome, &job.email, &email)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SchoolWelcomeEmailJob {
    email: String,
    school_name: String,
    owner_name: String,
    activation_token: String,
}

/// Sent to a school's admin after onboarding; carries their account
/// activation link.
pub struct SchoolWelcomeEmailHandler {
    client: EmailClient,
}

impl SchoolWelcomeEmailHandler {
    pub fn new(client: EmailClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobHandler for SchoolWelcomeEmailHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        let job: SchoolWelcomeEmailJob = serde_json::from_value(data)?;
        let url = templates::activation_url(&job.activation_token);
        let email = templates::school_welcome(&job.school_name, &job.owner_name, &url);
        self.client
            .send(FromAddress::Welcome, &job.email, &email)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PasswordResetEmailJob {
    email: String,
    user_name: String,
    reset_url: String,
    #[serde(default)]
    expiration_time: Option<String>,
}

pub struct PasswordResetEmailHandler {
    client: EmailClient,
}

impl PasswordResetEmailHandler {
    pub fn new(client: EmailClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobHandler for PasswordResetEmailHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        let job: PasswordResetEmailJob = serde_json::from_value(data)?;
        let expiration = job.expiration_time.as_deref().unwrap_or("1 hour");
        let email = templates::password_reset(&job.user_name, &job.reset_url, expiration);
        self.client
            .send(FromAddress::Support, &job.email, &email)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct NotificationEmailJob {
    email: String,
    title: String,
    message: String,
    user_name: String,
    #[serde(default)]
    action_url: Option<String>,
    #[serde(default)]
    action_button_text: Option<String>,
}

pub struct NotificationEmailHandler {
    client: EmailClient,
}

impl NotificationEmailHandler {
    pub fn new(client: EmailClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobHandler for NotificationEmailHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        let job: NotificationEmailJob = serde_json::from_value(data)?;
        let email = templates::notification(
            &job.title,
            &job.message,
            &job.user_name,
            job.action_url.as_deref(),
            job.action_button_text.as_deref().unwrap_or("Take Action"),
        );
        self.client
            .send(FromAddress::Noreply, &job.email, &email)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TemplatedEmailJob {
    email: String,
    template_name: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    template_data: Value,
}

/// Catch-all for callers that pick a template at runtime
pub struct TemplatedEmailHandler {
    client: EmailClient,
}

impl TemplatedEmailHandler {
    pub fn new(client: EmailClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JobHandler for TemplatedEmailHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        let job: TemplatedEmailJob = serde_json::from_value(data)?;
        let email = templates::render_named(&job.template_name, &job.subject, &job.template_data)?;
        self.client
            .send(FromAddress::Noreply, &job.email, &email)
            .await?;
        Ok(())
    }
}

/// No-op handler used by the queue smoke-test endpoints
pub struct TestJobHandler;

#[async_trait]
impl JobHandler for TestJobHandler {
    async fn handle(&self, data: Value) -> anyhow::Result<()> {
        info!(payload = %data, "Processed test job");
        Ok(())
    }
}
