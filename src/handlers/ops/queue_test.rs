// Operational endpoints for exercising the queue end to end

use axum::{Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::queue::{job_types, QueueService, WorkerHandle};

#[derive(Debug, Deserialize, Default)]
pub struct QueueTestRequest {
    pub message: Option<String>,
    pub job_type: Option<String>,
    pub delay: Option<i64>,
}

/// Enqueue a single test job; the worker picks it up on its next poll
pub async fn test_post(
    Extension(queue): Extension<QueueService>,
    payload: Option<Json<QueueTestRequest>>,
) -> ApiResult<Value> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let message = request
        .message
        .unwrap_or_else(|| "Hello from queue test!".to_string());
    let job_type = request
        .job_type
        .unwrap_or_else(|| job_types::TEST_JOB.to_string());
    let delay = request.delay.unwrap_or(0);

    let message_id = queue
        .enqueue_job(
            &job_type,
            json!({
                "message": message,
                "timestamp": Utc::now(),
            }),
            delay,
        )
        .await?;

    info!(%message_id, job_type, "Queued test job");

    Ok(ApiResponse::success(json!({
        "message": "Message sent to queue successfully",
        "note": "The queue worker will process this message on its next poll",
        "message_sent": {
            "id": message_id,
            "job_type": job_type,
            "delay": delay,
            "content": message,
        },
    })))
}

#[derive(Debug, Deserialize, Default)]
pub struct BulkQueueTestRequest {
    pub count: Option<u32>,
}

/// Enqueue a burst of test jobs to observe batch draining
pub async fn test_bulk_post(
    Extension(queue): Extension<QueueService>,
    payload: Option<Json<BulkQueueTestRequest>>,
) -> ApiResult<Value> {
    let count = payload
        .and_then(|Json(r)| r.count)
        .unwrap_or(5)
        .clamp(1, 20);

    let mut results = Vec::with_capacity(count as usize);
    for sequence in 1..=count {
        let message_id = queue
            .enqueue_job(
                job_types::TEST_JOB,
                json!({
                    "message": format!("Bulk test message {sequence}"),
                    "sequence_number": sequence,
                    "timestamp": Utc::now(),
                }),
                0,
            )
            .await?;

        results.push(json!({
            "sequence": sequence,
            "message_id": message_id,
        }));
    }

    Ok(ApiResponse::success(json!({
        "message": format!("Sent {count} messages to queue"),
        "results": results,
    })))
}

/// Snapshot of the background worker's registry and liveness
pub async fn worker_status_get(
    Extension(worker): Extension<WorkerHandle>,
) -> ApiResult<Value> {
    let status = worker.status();
    Ok(ApiResponse::success(serde_json::to_value(status).map_err(
        |e| {
            tracing::error!("Failed to serialize worker status: {}", e);
            ApiError::internal_server_error("Failed to read worker status")
        },
    )?))
}

/// Queue depth check for dashboards and alerts
pub async fn queue_health_get(Extension(queue): Extension<QueueService>) -> ApiResult<Value> {
    let visible = queue.store().visible_count().await?;

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "visible_jobs": visible,
    })))
}
