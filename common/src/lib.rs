//! Shared building blocks for the auth portal workspace.
//!
//! Nothing in here knows about HTTP, sessions or views. It holds the pieces
//! every other crate leans on:
//!
//! - **ErrorLocation**: file/line/column captured with `#[track_caller]`
//! - **HttpStatusCode**: status stored on rejection errors
//! - **RedactedSecret**: tokens and passwords that never reach a log line
//!
//! ## Architecture
//!
//! - **common** (this crate): error plumbing and secret handling
//! - **models**: pure data structures (claims, user records, credentials)
//! - **portal-core**: session, auth client, router and views
//! - **portal**: terminal front-end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
