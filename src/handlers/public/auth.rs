// POST /auth/login

use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth;
use crate::config;
use crate::database::models::PublicUser;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::repos;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Build the session cookie. HttpOnly always; Secure per environment.
pub fn session_cookie_header(token: &str, max_age_secs: i64) -> String {
    let session = &config::config().session;
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        session.cookie_name, token, max_age_secs
    );
    if session.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Authenticate with email and password; on success sets the session cookie
/// and returns the public user shape.
///
/// Unknown email and wrong password produce the same 401 so the endpoint
/// can't be used to probe for accounts.
pub async fn login_post(
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    // Absent or malformed fields are a 400, not the extractor's default 422
    let Json(payload) =
        payload.map_err(|_| ApiError::bad_request("Email and password are required"))?;

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let pool = DatabaseManager::pool().await?;

    let user = repos::users::find_by_email(&pool, &payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let stored = repos::user_passwords::find_active_by_user_id(&pool, user.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if auth::hash_user_password(&payload.password) != stored.hashed_password {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let ttl_hours = config::config().session.ttl_hours;
    let session_token = auth::generate_session_token();
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    repos::sessions::create(&pool, user.id, &session_token, expires_at).await?;

    info!(user_id = user.id, "User logged in");

    let cookie = session_cookie_header(&session_token, ttl_hours * 3600);
    let body = ApiResponse::success(json!({
        "message": "Login successful",
        "user": PublicUser::from(user),
    }));

    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_http_only_with_max_age() {
        let cookie = session_cookie_header("session_abc", 86400);
        assert!(cookie.starts_with("authenticated_session=session_abc"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("Path=/"));
    }
}
