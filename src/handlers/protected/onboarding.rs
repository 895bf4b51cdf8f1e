// GET /api/onboarding/status/:user_id

use axum::extract::Path;

use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::onboarding::{self, OnboardingStatusReport};

pub async fn status_get(Path(user_id): Path<i64>) -> ApiResult<OnboardingStatusReport> {
    let pool = DatabaseManager::pool().await?;
    let report = onboarding::get_onboarding_status(&pool, user_id).await?;
    Ok(ApiResponse::success(report))
}
