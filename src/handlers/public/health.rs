// GET / and GET /health

use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/login (public), /api/auth/logout (protected)",
            "users": "/users, /users/activate-account (public); /api/users* (protected)",
            "onboarding": "/onboarding/submit (public), /api/onboarding/status/:user_id (protected)",
            "ops": "/queue/test, /queue/test/bulk, /queue/worker/status, /queue/health, /email/test",
        },
    }))
}

/// Liveness probe that also checks database connectivity
pub async fn health() -> ApiResult<Value> {
    DatabaseManager::health_check()
        .await
        .map_err(|e| {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("Database unreachable")
        })?;

    Ok(ApiResponse::success(json!({ "status": "ok" })))
}
