pub mod activation_token;
pub mod school;
pub mod session;
pub mod user;
pub mod user_password;
pub mod user_school;

pub use activation_token::AccountActivationToken;
pub use school::{OnboardingStatus, School, SchoolAddress, SchoolOwner};
pub use session::UserSession;
pub use user::{PublicUser, User};
pub use user_password::UserPassword;
pub use user_school::{SchoolRole, UserSchool};
