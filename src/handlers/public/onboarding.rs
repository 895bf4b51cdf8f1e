// POST /onboarding/submit

use axum::{Extension, Json};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::database::models::PublicUser;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::repos;
use crate::services::onboarding::OnboardingForm;
use crate::services::{onboarding, NotificationService};

/// Process an onboarding submission: create the school with its admin user,
/// mint the admin's activation token, and queue the welcome email.
///
/// A failure to queue the email is logged but does not fail the request;
/// the school and admin user already exist at that point.
pub async fn submit_post(
    Extension(notifications): Extension<NotificationService>,
    Json(form): Json<OnboardingForm>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;

    let (school, admin_user) = onboarding::create_school_with_admin(&pool, &form).await?;

    let activation_token =
        repos::activation_tokens::create(&pool, admin_user.id, school.id).await?;

    match notifications
        .send_school_welcome_email(
            &form.business_owner.email,
            &form.name,
            &form.business_owner.name,
            &activation_token,
            0,
        )
        .await
    {
        Ok(message_id) => info!(
            school_id = school.id,
            %message_id,
            "School welcome email queued"
        ),
        Err(e) => error!(school_id = school.id, "Failed to queue welcome email: {}", e),
    }

    Ok(ApiResponse::created(json!({
        "message": "School onboarding completed successfully",
        "school": school,
        "admin_user": PublicUser::from(admin_user),
    })))
}
