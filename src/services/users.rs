use sqlx::PgPool;
use tracing::info;

use crate::auth;
use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::repos;

const PASSWORD_REQUIREMENTS: &str = "Password must be 8-100 characters and include an uppercase \
                                     letter, a lowercase letter, a number, and a special character";

/// Activate an account from the emailed token: set the first password,
/// activate the school membership, and burn the token.
///
/// The three writes share one transaction, so a transient failure rolls
/// everything back and the same link can be retried.
pub async fn activate_account(pool: &PgPool, token: &str, password: &str) -> Result<(), ApiError> {
    let activation_token = repos::activation_tokens::validate_active_token(pool, token)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid or expired account activation token"))?;
    let user_id = activation_token.user_id;

    ensure_first_password_allowed(pool, user_id, password).await?;
    let hashed = auth::hash_user_password(password);

    let mut tx = pool.begin().await.map_err(DatabaseError::from)?;

    repos::user_passwords::create_tx(&mut tx, user_id, &hashed).await?;

    let activated =
        repos::user_schools::activate_tx(&mut tx, user_id, activation_token.school_id).await?;
    if !activated {
        // Dropping the transaction rolls the password insert back
        return Err(ApiError::internal_server_error(
            "Failed to activate user for school",
        ));
    }

    repos::activation_tokens::consume_tx(&mut tx, activation_token.id).await?;

    tx.commit().await.map_err(DatabaseError::from)?;

    info!(user_id, school_id = activation_token.school_id, "Account activated");
    Ok(())
}

/// Set a user's first password outside the activation flow
pub async fn create_user_password(
    pool: &PgPool,
    user_id: i64,
    password: &str,
) -> Result<(), ApiError> {
    ensure_first_password_allowed(pool, user_id, password).await?;

    let hashed = auth::hash_user_password(password);
    repos::user_passwords::create(pool, user_id, &hashed).await?;

    Ok(())
}

/// First passwords only: complexity rules, and users who already have one
/// must go through the password reset flow instead.
async fn ensure_first_password_allowed(
    pool: &PgPool,
    user_id: i64,
    password: &str,
) -> Result<(), ApiError> {
    if !auth::raw_password_is_valid(password) {
        return Err(ApiError::validation_error(
            "Password does not meet requirements",
            vec![PASSWORD_REQUIREMENTS.to_string()],
        ));
    }

    if repos::user_passwords::find_active_by_user_id(pool, user_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict(
            "User already has a password, please use the password reset flow",
        ));
    }

    Ok(())
}
