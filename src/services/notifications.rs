use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::queue::{job_types, QueueError, QueueService};

/// Queues email jobs instead of sending inline, so request handlers never
/// block on the email provider.
#[derive(Clone)]
pub struct NotificationService {
    queue: QueueService,
}

impl NotificationService {
    pub fn new(queue: QueueService) -> Self {
        Self { queue }
    }

    pub async fn send_welcome_email(
        &self,
        email: &str,
        user_name: &str,
        action_url: Option<&str>,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        info!(email, "Queuing welcome email");
        self.queue
            .enqueue_job(
                job_types::WELCOME_EMAIL,
                json!({
                    "email": email,
                    "user_name": user_name,
                    "action_url": action_url,
                }),
                delay_seconds,
            )
            .await
    }

    /// Queue the post-onboarding email carrying the admin's activation token
    pub async fn send_school_welcome_email(
        &self,
        email: &str,
        school_name: &str,
        owner_name: &str,
        activation_token: &str,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        info!(email, school_name, "Queuing school welcome email");
        self.queue
            .enqueue_job(
                job_types::SCHOOL_WELCOME_EMAIL,
                json!({
                    "email": email,
                    "school_name": school_name,
                    "owner_name": owner_name,
                    "activation_token": activation_token,
                }),
                delay_seconds,
            )
            .await
    }

    pub async fn send_password_reset_email(
        &self,
        email: &str,
        user_name: &str,
        reset_url: &str,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        info!(email, "Queuing password reset email");
        self.queue
            .enqueue_job(
                job_types::PASSWORD_RESET_EMAIL,
                json!({
                    "email": email,
                    "user_name": user_name,
                    "reset_url": reset_url,
                }),
                delay_seconds,
            )
            .await
    }

    pub async fn send_notification_email(
        &self,
        email: &str,
        title: &str,
        message: &str,
        user_name: &str,
        action_url: Option<&str>,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        info!(email, title, "Queuing notification email");
        self.queue
            .enqueue_job(
                job_types::NOTIFICATION_EMAIL,
                json!({
                    "email": email,
                    "title": title,
                    "message": message,
                    "user_name": user_name,
                    "action_url": action_url,
                }),
                delay_seconds,
            )
            .await
    }

    pub async fn send_templated_email(
        &self,
        email: &str,
        template_name: &str,
        subject: &str,
        template_data: Value,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        info!(email, template_name, "Queuing templated email");
        self.queue
            .enqueue_job(
                job_types::TEMPLATED_EMAIL,
                json!({
                    "email": email,
                    "template_name": template_name,
                    "subject": subject,
                    "template_data": template_data,
                }),
                delay_seconds,
            )
            .await
    }

    /// Schedule any email job for a wall-clock time. Times in the past are
    /// delivered on the next poll.
    pub async fn schedule_email(
        &self,
        schedule_time: DateTime<Utc>,
        job_type: &str,
        data: Value,
    ) -> Result<Uuid, QueueError> {
        let delay_seconds = (schedule_time - Utc::now()).num_seconds().max(0);
        info!(%schedule_time, delay_seconds, job_type, "Scheduling email job");
        self.queue.enqueue_job(job_type, data, delay_seconds).await
    }
}
