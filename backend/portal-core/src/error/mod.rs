pub mod auth_client;
pub mod config;
pub mod session;
pub mod storage;
pub mod token;

pub use auth_client::AuthClientError;
pub use config::ConfigError;
pub use session::SessionError;
pub use storage::StorageError;
pub use token::TokenError;

