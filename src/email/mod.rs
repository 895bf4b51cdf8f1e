//! Transactional email over the Resend-compatible HTTP API.
//!
//! Templates are rendered in-process; the client only talks to the
//! provider's `/emails` endpoint. Callers in request paths should go
//! through `NotificationService` (which queues jobs) rather than sending
//! inline.

pub mod client;
pub mod templates;

use thiserror::Error;

pub use client::{EmailClient, FromAddress};
pub use templates::RenderedEmail;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Unknown email template: {0}")]
    UnknownTemplate(String),
}
