//! Repository layer: per-entity SQL against the shared pool.
//!
//! Default queries exclude soft-deleted rows (`deleted_at IS NULL`); deletes
//! are soft (stamping `deleted_at`) so rows can be audited or restored.

pub mod activation_tokens;
pub mod schools;
pub mod sessions;
pub mod user_passwords;
pub mod user_schools;
pub mod users;
