// POST /api/auth/logout

use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Extension;
use serde_json::json;
use tracing::info;

use crate::config;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AuthUser};
use crate::repos;

fn clear_session_cookie() -> String {
    let session = &config::config().session;
    format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax",
        session.cookie_name
    )
}

/// Invalidate the current session and clear the cookie
pub async fn logout_post(Extension(auth): Extension<AuthUser>) -> Result<Response, ApiError> {
    let pool = DatabaseManager::pool().await?;
    repos::sessions::invalidate(&pool, auth.session_id).await?;

    info!(user_id = auth.user_id, "User logged out");

    let body = ApiResponse::success(json!({ "message": "Logout successful" }));
    Ok(([(header::SET_COOKIE, clear_session_cookie())], body).into_response())
}
