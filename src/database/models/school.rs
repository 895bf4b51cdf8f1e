use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle of a school through onboarding. Stored as plain varchar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    Pending,
    InProgress,
    Completed,
}

impl OnboardingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::Pending => "pending",
            OnboardingStatus::InProgress => "in_progress",
            OnboardingStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OnboardingStatus::Pending),
            "in_progress" => Some(OnboardingStatus::InProgress),
            "completed" => Some(OnboardingStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: i64,
    pub name: Option<String>,
    pub phone: Option<String>,
    /// Location of the school logo in object storage, when one was uploaded
    pub logo: Option<String>,
    pub website: Option<String>,
    pub support_email: Option<String>,
    pub onboarding_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolAddress {
    pub id: i64,
    pub school_id: Option<i64>,
    pub street: Option<String>,
    pub street2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SchoolOwner {
    pub id: i64,
    pub school_id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onboarding_status_round_trips() {
        for status in [
            OnboardingStatus::Pending,
            OnboardingStatus::InProgress,
            OnboardingStatus::Completed,
        ] {
            assert_eq!(OnboardingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OnboardingStatus::parse("archived"), None);
    }
}
