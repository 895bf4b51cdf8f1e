use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Single-use, time-bound credential emailed to a new account.
///
/// The `token` column holds the Sha256 hex of the plain token; the plain
/// value only ever exists in the activation email.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountActivationToken {
    pub id: i64,
    pub user_id: i64,
    pub school_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
