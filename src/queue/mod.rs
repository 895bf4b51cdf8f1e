//! Asynchronous job queue: enqueue → poll → dispatch → acknowledge/delete.
//!
//! Jobs live in Postgres and are claimed with `FOR UPDATE SKIP LOCKED`,
//! giving the same contract as a managed queue: delayed delivery, a
//! visibility timeout while a job is being worked, deletion as the
//! acknowledgement, and implicit redelivery when a handler fails.

pub mod handlers;
pub mod service;
pub mod store;
pub mod worker;

use thiserror::Error;

/// Job type names shared by producers and the worker's handler registry
pub mod job_types {
    pub const WELCOME_EMAIL: &str = "welcome-email";
    pub const SCHOOL_WELCOME_EMAIL: &str = "school-welcome-email";
    pub const PASSWORD_RESET_EMAIL: &str = "password-reset-email";
    pub const NOTIFICATION_EMAIL: &str = "notification-email";
    pub const TEMPLATED_EMAIL: &str = "templated-email";
    pub const TEST_JOB: &str = "test-job";
}

pub use service::{JobEnvelope, QueueService};
pub use store::{QueueStore, ReceivedJob};
pub use worker::{JobHandler, QueueWorker, WorkerHandle, WorkerStatus};

#[derive(Debug, Error)]
pub enum QueueError {
    #[error(transparent)]
    Database(#[from] crate::database::manager::DatabaseError),

    #[error("Job serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
