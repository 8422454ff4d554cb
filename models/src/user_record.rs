use crate::claims::null_as_default;
use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// One row of the admin dashboard's user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
}

impl UserRecord {
    pub fn new(
        username: impl Into<String>,
        role: impl Into<String>,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permissions_joined(&self) -> String {
        self.permissions.join(", ")
    }
}

impl fmt::Display for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Username: {}, Role: {}, Permissions: {}",
            self.username,
            self.role,
            self.permissions_joined()
        )
    }
}

/// Parse a cached user list.
///
/// The cache must hold a JSON array of records. `null`, objects and bare
/// strings are rejected so the admin view can show a notice instead of
/// rendering garbage.
#[track_caller]
pub fn parse_user_list(json: &str) -> Result<Vec<UserRecord>, ModelError> {
    serde_json::from_str::<Vec<UserRecord>>(json).map_err(|e| ModelError::Parse {
        message: format!("Cached user list is not a JSON array of users: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
