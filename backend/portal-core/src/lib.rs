pub mod auth_client;
pub mod config;
pub mod error;
pub mod portal;
pub mod router;
pub mod session;
pub mod storage;
pub mod token;
pub mod views;

#[cfg(test)]
mod tests;

pub use auth_client::{AuthClient, AuthTransport, LoginResponseFormat};
pub use config::PortalConfig;
pub use portal::{Action, ActionOutcome, Portal};
pub use router::Route;
pub use session::SessionContext;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use token::{TokenVerifier, VerificationMode};

pub const APP_NAME: &str = "auth-portal";
pub const DEFAULT_API_HOST: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 4000;
pub const DEFAULT_API_URL: &str =
    const_format::concatcp!("http://", DEFAULT_API_HOST, ":", DEFAULT_API_PORT);
