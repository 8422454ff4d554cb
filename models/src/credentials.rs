use common::RedactedSecret;

/// Username/password pair typed into the register and login form.
///
/// Both forms write into the same pair. It is cleared on every navigation
/// and never persisted.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: RedactedSecret,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<RedactedSecret>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
    }

    pub fn set_password(&mut self, password: impl Into<RedactedSecret>) {
        self.password = password.into();
    }

    pub fn clear(&mut self) {
        self.username.clear();
        self.password = RedactedSecret::default();
    }

    pub fn is_blank(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}
