use serde::{Deserialize, Deserializer, Serialize};

/// Role that unlocks every client-side convenience check.
pub const ADMIN_ROLE: &str = "admin";

/// Permission granted by `/admin/authorize` that enables the background button.
pub const CHANGE_BACKGROUND_PERMISSION: &str = "changeBackground";

/// Claims carried in the payload segment of a session token.
///
/// Missing or `null` fields default to empty so a sparse token still
/// decodes; the checks below then simply fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<String>,
    /// Expiry as seconds since the Unix epoch, when the issuer sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl Claims {
    pub fn new(
        username: impl Into<String>,
        role: impl Into<String>,
        permissions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
            permissions: permissions.into_iter().map(Into::into).collect(),
            exp: None,
        }
    }

    pub fn with_exp(mut self, exp: u64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    /// UI hint only. The server never sees this decision.
    pub fn can_change_background(&self) -> bool {
        self.is_admin() || self.has_permission(CHANGE_BACKGROUND_PERMISSION)
    }

    /// True when `exp` is set and is not after `now_secs`.
    pub fn is_expired_at(&self, now_secs: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now_secs)
    }
}

/// Treat an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
