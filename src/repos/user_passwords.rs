use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::UserPassword;

const PASSWORD_COLUMNS: &str =
    "id, user_id, hashed_password, created_at, updated_at, deleted_at";

/// Fetch the active password row for a user, if any.
///
/// The partial unique index on (user_id) guarantees at most one live row.
pub async fn find_active_by_user_id(
    pool: &PgPool,
    user_id: i64,
) -> Result<Option<UserPassword>, DatabaseError> {
    let password = sqlx::query_as::<_, UserPassword>(&format!(
        "SELECT {PASSWORD_COLUMNS} FROM user_passwords
         WHERE user_id = $1 AND deleted_at IS NULL"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(password)
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    hashed_password: &str,
) -> Result<UserPassword, DatabaseError> {
    let password = sqlx::query_as::<_, UserPassword>(&format!(
        "INSERT INTO user_passwords (user_id, hashed_password)
         VALUES ($1, $2) RETURNING {PASSWORD_COLUMNS}"
    ))
    .bind(user_id)
    .bind(hashed_password)
    .fetch_one(pool)
    .await?;

    Ok(password)
}

/// Transaction-aware insert for the activation flow, where the password
/// must land together with the membership activation
pub async fn create_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    hashed_password: &str,
) -> Result<UserPassword, DatabaseError> {
    let password = sqlx::query_as::<_, UserPassword>(&format!(
        "INSERT INTO user_passwords (user_id, hashed_password)
         VALUES ($1, $2) RETURNING {PASSWORD_COLUMNS}"
    ))
    .bind(user_id)
    .bind(hashed_password)
    .fetch_one(&mut **tx)
    .await?;

    Ok(password)
}
