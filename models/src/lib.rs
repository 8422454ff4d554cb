//! Domain models for the auth portal.
//!
//! Pure data structures with no I/O: the claims carried inside a session token,
//! the user records the admin dashboard lists, and the credentials a visitor
//! types into the register/login form.

pub mod claims;
pub mod credentials;
pub mod error;
pub mod user_record;

#[cfg(test)]
mod tests;

pub use claims::{ADMIN_ROLE, CHANGE_BACKGROUND_PERMISSION, Claims};
pub use common::ErrorLocation;
pub use credentials::Credentials;
pub use error::model_error::ModelError;
pub use user_record::{UserRecord, parse_user_list};
