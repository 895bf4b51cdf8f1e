use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::User;

const USER_COLUMNS: &str = "id, name, email, created_at, updated_at, deleted_at";

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// List users, excluding soft-deleted rows unless explicitly asked for
pub async fn find_all(pool: &PgPool, include_deleted: bool) -> Result<Vec<User>, DatabaseError> {
    let sql = if include_deleted {
        format!("SELECT {USER_COLUMNS} FROM users ORDER BY id")
    } else {
        format!("SELECT {USER_COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY id")
    };

    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn create(pool: &PgPool, name: &str, email: &str) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Transaction-aware insert for flows that create a user alongside other rows
pub async fn create_tx(
    tx: &mut Transaction<'_, Postgres>,
    name: &str,
    email: &str,
) -> Result<User, DatabaseError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .fetch_one(&mut **tx)
    .await?;

    Ok(user)
}

/// Soft-delete a user; returns false when no live row matched
pub async fn soft_delete(pool: &PgPool, id: i64) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "UPDATE users SET deleted_at = now(), updated_at = now()
         WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
