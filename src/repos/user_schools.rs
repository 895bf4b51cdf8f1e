use sqlx::{PgPool, Postgres, Transaction};

use crate::database::manager::DatabaseError;
use crate::database::models::{SchoolRole, UserSchool};

const USER_SCHOOL_COLUMNS: &str =
    "id, school_id, user_id, role, permissions, is_active, created_at, updated_at, deleted_at";

/// Insert a role assignment inside an existing transaction. New assignments
/// start inactive; activation happens through the token flow.
pub async fn create_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    school_id: i64,
    role: SchoolRole,
) -> Result<UserSchool, DatabaseError> {
    let user_school = sqlx::query_as::<_, UserSchool>(&format!(
        "INSERT INTO user_schools (user_id, school_id, role, permissions, is_active)
         VALUES ($1, $2, $3, '[]', false) RETURNING {USER_SCHOOL_COLUMNS}"
    ))
    .bind(user_id)
    .bind(school_id)
    .bind(role.as_str())
    .fetch_one(&mut **tx)
    .await?;

    Ok(user_school)
}

pub async fn find_by_user_id(
    pool: &PgPool,
    user_id: i64,
) -> Result<Vec<UserSchool>, DatabaseError> {
    let rows = sqlx::query_as::<_, UserSchool>(&format!(
        "SELECT {USER_SCHOOL_COLUMNS} FROM user_schools
         WHERE user_id = $1 AND deleted_at IS NULL"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Flip the activation flag for a user's school membership. Runs inside
/// the activation transaction so it commits with the first password.
pub async fn activate_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    school_id: i64,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "UPDATE user_schools SET is_active = true, updated_at = now()
         WHERE user_id = $1 AND school_id = $2 AND deleted_at IS NULL",
    )
    .bind(user_id)
    .bind(school_id)
    .execute(&mut **tx)
    .await?;

    Ok(result.rows_affected() > 0)
}
