//! Error types for calls against the authentication server.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Server-provided messages kept verbatim so they can be shown as-is
//! - Every variant names the operation it came from
//! - `#[track_caller]` for automatic location capture

use crate::auth_client::Operation;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthClientError {
    /// Non-2xx answer. `message` is the raw body for register/login and the
    /// JSON `message` field for the admin endpoints (empty when absent).
    #[error("Server rejected {operation}: HTTP {status_code} - {message} {location}")]
    Rejected {
        operation: Operation,
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network error during {operation}: {message} {location}")]
    Network {
        operation: Operation,
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    /// 2xx answer whose body could not be understood.
    #[error("Unexpected response to {operation}: {message} {location}")]
    Response {
        operation: Operation,
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthClientError {
    #[track_caller]
    pub fn rejected(operation: Operation, status_code: u16, message: impl Into<String>) -> Self {
        AuthClientError::Rejected {
            operation,
            status_code: HttpStatusCode(status_code),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn response(operation: Operation, message: impl Into<String>) -> Self {
        AuthClientError::Response {
            operation,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from reqwest error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(operation: Operation, error: &reqwest::Error) -> Self {
        // Check for specific error types BEFORE converting to string
        let is_timeout = error.is_timeout();
        let is_connection = error.is_connect();

        if error.is_decode() {
            return AuthClientError::Response {
                operation,
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        AuthClientError::Network {
            operation,
            message: error.to_string(),
            is_timeout,
            is_connection,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            AuthClientError::Rejected { operation, .. }
            | AuthClientError::Network { operation, .. }
            | AuthClientError::Response { operation, .. } => Some(*operation),
            AuthClientError::UrlParse { .. } | AuthClientError::Client { .. } => None,
        }
    }

    /// The server's own explanation, when it sent a non-empty one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AuthClientError::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthClientError::Rejected { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Get error category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            AuthClientError::Rejected { status_code, .. } if status_code.is_auth_rejection() => {
                "unauthorized"
            }
            AuthClientError::Rejected { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            AuthClientError::Rejected { .. } => "rejected",
            AuthClientError::Network { is_timeout: true, .. } => "timeout",
            AuthClientError::Network { is_connection: true, .. } => "connection",
            AuthClientError::Network { .. } => "network",
            AuthClientError::Response { .. } => "response",
            AuthClientError::UrlParse { .. } => "url",
            AuthClientError::Client { .. } => "client",
        }
    }
}

impl From<url::ParseError> for AuthClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        AuthClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
