use portal_core::error::{AuthClientError, ConfigError, SessionError, StorageError};

use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors raised by the terminal front-end.
///
/// Core errors are flattened to their message here; the structured error has
/// already been logged where it happened.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum PortalAppError {
    /// Error from this app (startup, logging, I/O)
    #[error("Portal Error: {message} {location}")]
    Portal {
        message: String,
        location: ErrorLocation,
    },

    /// Error from portal-core (config, storage, client construction)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// A console line that is not a known command
    #[error("Command Error: {message} {location}")]
    Command {
        message: String,
        location: ErrorLocation,
    },

    /// The state actor is gone
    #[error("State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },
}

impl PortalAppError {
    #[track_caller]
    pub fn portal(message: impl Into<String>) -> Self {
        PortalAppError::Portal {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn core(error: impl std::fmt::Display) -> Self {
        PortalAppError::Core {
            message: error.to_string(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn command(message: impl Into<String>) -> Self {
        PortalAppError::Command {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn state(message: impl Into<String>) -> Self {
        PortalAppError::State {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

macro_rules! core_error_from {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for PortalAppError {
                #[track_caller]
                fn from(error: $source) -> Self {
                    PortalAppError::core(error)
                }
            }
        )+
    };
}

core_error_from!(AuthClientError, ConfigError, SessionError, StorageError);
