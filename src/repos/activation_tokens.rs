use chrono::{Duration, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::auth;
use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::AccountActivationToken;

const TOKEN_COLUMNS: &str =
    "id, user_id, school_id, token, expires_at, created_at, updated_at, deleted_at";

/// Create an activation token for a user/school pair and return the PLAIN
/// token for emailing. Only the Sha256 hash is stored.
pub async fn create(
    pool: &PgPool,
    user_id: i64,
    school_id: i64,
) -> Result<String, DatabaseError> {
    let plain_token = auth::generate_activation_token();
    let hashed_token = auth::hash_activation_token(&plain_token);
    let ttl = config::config().session.activation_token_ttl_secs;
    let expires_at = Utc::now() + Duration::seconds(ttl);

    sqlx::query(
        "INSERT INTO account_activation_tokens (user_id, school_id, token, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(school_id)
    .bind(&hashed_token)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(plain_token)
}

/// Validate a plain token: present, not consumed, not expired.
/// Returns None for unknown, already-used, or expired tokens.
pub async fn validate_active_token(
    pool: &PgPool,
    plain_token: &str,
) -> Result<Option<AccountActivationToken>, DatabaseError> {
    let hashed_token = auth::hash_activation_token(plain_token);

    let token = sqlx::query_as::<_, AccountActivationToken>(&format!(
        "SELECT {TOKEN_COLUMNS} FROM account_activation_tokens
         WHERE token = $1 AND deleted_at IS NULL
         LIMIT 1"
    ))
    .bind(&hashed_token)
    .fetch_optional(pool)
    .await?;

    match token {
        Some(t) if t.expires_at >= Utc::now() => Ok(Some(t)),
        _ => Ok(None),
    }
}

/// Consume a token after successful activation. Tokens are single-use;
/// consumption commits in the same transaction as the activation writes.
pub async fn consume_tx(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE account_activation_tokens SET deleted_at = now(), updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(
            "Account activation token not found".to_string(),
        ));
    }

    Ok(())
}
