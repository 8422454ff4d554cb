use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Reasons a session token cannot be decoded or trusted.
///
/// Every variant means the same thing to callers: treat the visitor as
/// unauthenticated.
#[derive(Debug, ThisError)]
pub enum TokenError {
    #[error("Malformed Token: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsigned Token: {message} {location}")]
    Unsigned {
        message: String,
        location: ErrorLocation,
    },

    #[error("Expired Token {location}")]
    Expired { location: ErrorLocation },

    #[error("Invalid Token Signature {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Missing Verification Secret: {message} {location}")]
    MissingSecret {
        message: String,
        location: ErrorLocation,
    },
}

impl TokenError {
    #[track_caller]
    pub fn malformed(message: impl Into<String>) -> Self {
        TokenError::Malformed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsigned(message: impl Into<String>) -> Self {
        TokenError::Unsigned {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn expired() -> Self {
        TokenError::Expired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_signature() -> Self {
        TokenError::InvalidSignature {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short category name for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            TokenError::Malformed { .. } => "malformed",
            TokenError::Unsigned { .. } => "unsigned",
            TokenError::Expired { .. } => "expired",
            TokenError::InvalidSignature { .. } => "invalid_signature",
            TokenError::MissingSecret { .. } => "missing_secret",
        }
    }
}
