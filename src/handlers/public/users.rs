// POST /users and POST /users/activate-account

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::PublicUser;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::repos;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

pub async fn create_user_post(
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<PublicUser> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(ApiError::bad_request("Name and email are required"));
    }

    let pool = DatabaseManager::pool().await?;

    if repos::users::find_by_email(&pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("User with this email already exists"));
    }

    let user = repos::users::create(&pool, &payload.name, &payload.email).await?;
    Ok(ApiResponse::created(PublicUser::from(user)))
}

#[derive(Debug, Deserialize)]
pub struct ActivateAccountRequest {
    pub token: String,
    pub password: String,
}

/// Combined activation endpoint: the emailed token plus the user's chosen
/// first password in one request. The token identifies the user.
pub async fn activate_account_post(
    Json(payload): Json<ActivateAccountRequest>,
) -> ApiResult<Value> {
    if payload.token.trim().is_empty() {
        return Err(ApiError::bad_request("Activation token is required"));
    }

    let pool = DatabaseManager::pool().await?;
    services::users::activate_account(&pool, &payload.token, &payload.password).await?;

    Ok(ApiResponse::success(json!({
        "message": "Account activated successfully"
    })))
}
