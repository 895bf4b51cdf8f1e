pub mod auth;
pub mod onboarding;
pub mod users;
