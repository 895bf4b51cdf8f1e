use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role a user holds within a school. Stored as plain varchar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolRole {
    Admin,
    Teacher,
    Parent,
}

impl SchoolRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolRole::Admin => "admin",
            SchoolRole::Teacher => "teacher",
            SchoolRole::Parent => "parent",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(SchoolRole::Admin),
            "teacher" => Some(SchoolRole::Teacher),
            "parent" => Some(SchoolRole::Parent),
            _ => None,
        }
    }
}

/// Role-assignment join row linking a user to a school.
///
/// `is_active` stays false until the user completes account activation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSchool {
    pub id: i64,
    pub school_id: i64,
    pub user_id: i64,
    pub role: String,
    pub permissions: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        for role in [SchoolRole::Admin, SchoolRole::Teacher, SchoolRole::Parent] {
            assert_eq!(SchoolRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(SchoolRole::parse("principal"), None);
    }
}
