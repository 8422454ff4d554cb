//! Persistent key/value storage backing the session.
//!
//! Plays the part a browser's local storage plays for a web client: a flat
//! string map that survives restarts. Two keys are used, [`TOKEN_KEY`] and
//! [`USERS_KEY`].

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-serialized user list from the admin dashboard.
pub const USERS_KEY: &str = "users";

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
