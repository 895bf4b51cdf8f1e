use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::QueueError;
use crate::config;

/// A job claimed from the queue. Holds the raw payload; envelope parsing is
/// the worker's problem so a malformed payload can't wedge the store.
#[derive(Debug, Clone, FromRow)]
pub struct ReceivedJob {
    pub id: Uuid,
    pub job_type: String,
    pub payload: Value,
    pub enqueued_at: DateTime<Utc>,
    pub available_at: DateTime<Utc>,
    pub receive_count: i32,
}

/// Postgres-backed queue storage with managed-queue semantics
#[derive(Clone)]
pub struct QueueStore {
    pool: PgPool,
}

impl QueueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enqueue a payload; `delay_seconds` postpones first visibility
    pub async fn send(
        &self,
        id: Uuid,
        job_type: &str,
        payload: &Value,
        delay_seconds: i64,
    ) -> Result<Uuid, QueueError> {
        sqlx::query(
            "INSERT INTO queue_jobs (id, job_type, payload, available_at)
             VALUES ($1, $2, $3, now() + make_interval(secs => $4))",
        )
        .bind(id)
        .bind(job_type)
        .bind(payload)
        .bind(delay_seconds as f64)
        .execute(&self.pool)
        .await
        .map_err(crate::database::manager::DatabaseError::from)?;

        Ok(id)
    }

    /// Claim up to `max` visible jobs. Claimed jobs stay in the table with
    /// their `available_at` pushed past the visibility window, so a crashed
    /// or failing worker gets them redelivered automatically.
    pub async fn receive(&self, max: i64) -> Result<Vec<ReceivedJob>, QueueError> {
        let visibility = config::config().queue.visibility_timeout_secs;

        let jobs = sqlx::query_as::<_, ReceivedJob>(
            "WITH claimed AS (
                 SELECT id FROM queue_jobs
                 WHERE available_at <= now()
                 ORDER BY available_at
                 LIMIT $1
                 FOR UPDATE SKIP LOCKED
             )
             UPDATE queue_jobs q
             SET available_at = now() + make_interval(secs => $2),
                 receive_count = q.receive_count + 1
             FROM claimed
             WHERE q.id = claimed.id
             RETURNING q.id, q.job_type, q.payload, q.enqueued_at, q.available_at, q.receive_count",
        )
        .bind(max)
        .bind(visibility as f64)
        .fetch_all(&self.pool)
        .await
        .map_err(crate::database::manager::DatabaseError::from)?;

        Ok(jobs)
    }

    /// Acknowledge a job after successful processing
    pub async fn delete(&self, id: Uuid) -> Result<bool, QueueError> {
        let result = sqlx::query("DELETE FROM queue_jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(crate::database::manager::DatabaseError::from)?;

        Ok(result.rows_affected() > 0)
    }

    /// Count of jobs currently waiting (visible) in the queue
    pub async fn visible_count(&self) -> Result<i64, QueueError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM queue_jobs WHERE available_at <= now()")
                .fetch_one(&self.pool)
                .await
                .map_err(crate::database::manager::DatabaseError::from)?;

        Ok(count.0)
    }
}
