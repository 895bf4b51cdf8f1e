use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::UserSession;

const SESSION_COLUMNS: &str =
    "id, user_id, session_token, expires_at, created_at, updated_at, deleted_at";

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    session_token: &str,
    expires_at: DateTime<Utc>,
) -> Result<UserSession, DatabaseError> {
    let session = sqlx::query_as::<_, UserSession>(&format!(
        "INSERT INTO sessions (user_id, session_token, expires_at)
         VALUES ($1, $2, $3) RETURNING {SESSION_COLUMNS}"
    ))
    .bind(user_id)
    .bind(session_token)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Look up a live session by its token. Expiry is checked by the caller so
/// an expired-but-present session can be distinguished for logging.
pub async fn find_by_token(
    pool: &PgPool,
    session_token: &str,
) -> Result<Option<UserSession>, DatabaseError> {
    let session = sqlx::query_as::<_, UserSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM sessions
         WHERE session_token = $1 AND deleted_at IS NULL"
    ))
    .bind(session_token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Invalidate a session (logout) via soft delete
pub async fn invalidate(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "UPDATE sessions SET deleted_at = now(), updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
