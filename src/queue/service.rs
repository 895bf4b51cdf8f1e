use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{QueueError, QueueStore};

/// Wire format for a queued job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobEnvelope {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub job_type: String,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

impl JobEnvelope {
    pub fn new(job_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_type: job_type.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

/// Producer-side API: wraps payloads in an envelope and hands them to storage
#[derive(Clone)]
pub struct QueueService {
    store: QueueStore,
}

impl QueueService {
    pub fn new(store: QueueStore) -> Self {
        Self { store }
    }

    /// Enqueue a job, optionally delayed by `delay_seconds`. Returns the
    /// message id for correlation in logs.
    pub async fn enqueue_job(
        &self,
        job_type: &str,
        data: Value,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        let envelope = JobEnvelope::new(job_type, data);
        let payload = serde_json::to_value(&envelope)?;

        let id = self
            .store
            .send(envelope.id, job_type, &payload, delay_seconds.max(0))
            .await?;

        tracing::debug!(job_type, message_id = %id, delay_seconds, "Job enqueued");
        Ok(id)
    }

    pub fn store(&self) -> &QueueStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_round_trips_through_json() {
        let envelope = JobEnvelope::new("welcome-email", json!({ "email": "a@b.c" }));
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["type"], "welcome-email");
        let back: JobEnvelope = serde_json::from_value(value).unwrap();
        assert_eq!(back.id, envelope.id);
        assert_eq!(back.job_type, "welcome-email");
        assert_eq!(back.data["email"], "a@b.c");
    }

    #[test]
    fn envelope_ids_are_unique() {
        let a = JobEnvelope::new("test-job", json!({}));
        let b = JobEnvelope::new("test-job", json!({}));
        assert_ne!(a.id, b.id);
    }
}
