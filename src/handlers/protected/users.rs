// /api/users handlers

use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::PublicUser;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::repos;
use crate::services;

pub async fn get_user(Path(id): Path<i64>) -> ApiResult<PublicUser> {
    let pool = DatabaseManager::pool().await?;
    let user = repos::users::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(ApiResponse::success(PublicUser::from(user)))
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

pub async fn list_users(Query(query): Query<ListUsersQuery>) -> ApiResult<Vec<PublicUser>> {
    let pool = DatabaseManager::pool().await?;
    let users = repos::users::find_all(&pool, query.include_deleted).await?;

    Ok(ApiResponse::success(
        users.into_iter().map(PublicUser::from).collect(),
    ))
}

/// Soft-delete a user; their row survives for audit but drops out of
/// default queries.
pub async fn delete_user(Path(id): Path<i64>) -> ApiResult<()> {
    let pool = DatabaseManager::pool().await?;
    let deleted = repos::users::soft_delete(&pool, id).await?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(ApiResponse::<()>::no_content())
}

#[derive(Debug, Deserialize)]
pub struct CreatePasswordRequest {
    pub password: String,
}

/// First-password creation for an already-activated user
pub async fn create_password_post(
    Path(user_id): Path<i64>,
    Json(payload): Json<CreatePasswordRequest>,
) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    services::users::create_user_password(&pool, user_id, &payload.password).await?;

    Ok(ApiResponse::created(json!({
        "message": "Password created successfully"
    })))
}
