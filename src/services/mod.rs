//! Business logic that spans repositories: onboarding orchestration,
//! account activation, and the queue-backed notification facade.

pub mod notifications;
pub mod onboarding;
pub mod users;

pub use notifications::NotificationService;
