//! Session context: the visitor's token and the cached user list.
//!
//! One `SessionContext` is created at startup, hydrated from storage, and
//! handed to whoever needs it. Nothing else reads the storage keys directly.

use crate::error::SessionError;
use crate::storage::{Storage, TOKEN_KEY, USERS_KEY};

use common::{ErrorLocation, RedactedSecret};
use models::{UserRecord, parse_user_list};

use std::panic::Location;

use log::{debug, info, warn};

pub struct SessionContext<S: Storage> {
    storage: S,
    token: RedactedSecret,
}

impl<S: Storage> SessionContext<S> {
    /// Build a context and restore any token persisted by a previous run.
    pub fn hydrate(storage: S) -> Result<Self, SessionError> {
        let mut session = Self {
            storage,
            token: RedactedSecret::default(),
        };
        session.reload()?;
        Ok(session)
    }

    /// Re-read the token from storage, as a full page reload would.
    pub fn reload(&mut self) -> Result<(), SessionError> {
        let stored = self.storage.get(TOKEN_KEY)?.unwrap_or_default();
        self.token = RedactedSecret::new(stored);

        if self.token.is_empty() {
            debug!("No persisted session token");
        } else {
            debug!("Restored session token ({} bytes)", self.token.len());
        }
        Ok(())
    }

    /// The current token, `None` when logged out.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(self.token.as_str())
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    /// Store a token in memory and in storage.
    ///
    /// An empty token is the same as [`Self::clear_session`].
    pub fn set_session(&mut self, token: impl Into<RedactedSecret>) -> Result<(), SessionError> {
        let token = token.into();
        if token.is_empty() {
            warn!("Refusing to store an empty session token, clearing session instead");
            return self.clear_session();
        }

        self.storage.set(TOKEN_KEY, token.as_str())?;
        self.token = token;
        info!("Session established");
        Ok(())
    }

    /// Forget the token. Memory is cleared even if storage fails.
    pub fn clear_session(&mut self) -> Result<(), SessionError> {
        self.token = RedactedSecret::default();
        self.storage.remove(TOKEN_KEY)?;
        info!("Session cleared");
        Ok(())
    }

    /// Replace the cached user list.
    pub fn cache_users(&mut self, users: &[UserRecord]) -> Result<(), SessionError> {
        let json = serde_json::to_string(users).map_err(|e| SessionError::CacheSerialize {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.storage.set(USERS_KEY, &json)?;
        debug!("Cached {} users", users.len());
        Ok(())
    }

    /// The cached user list.
    ///
    /// `Ok(None)` when nothing was ever cached, an error when the cache holds
    /// something other than a JSON array of users.
    pub fn cached_users(&self) -> Result<Option<Vec<UserRecord>>, SessionError> {
        let Some(json) = self.storage.get(USERS_KEY)? else {
            return Ok(None);
        };

        parse_user_list(&json)
            .map(Some)
            .map_err(|source| SessionError::CorruptCache {
                message: format!("'{USERS_KEY}' entry is unreadable"),
                location: ErrorLocation::from(Location::caller()),
                source,
            })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
