use models::UserRecord;

/// Label of the selector's placeholder option.
pub const SELECT_PLACEHOLDER: &str = "Select a user";

/// Shown instead of the list when the cache cannot be read.
pub const UNREADABLE_CACHE_NOTICE: &str =
    "User list unavailable. Go back and open the Admin Dashboard again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Admin dashboard contents: the cached users and the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminView {
    pub users: Vec<UserRecord>,
    pub selected: String,
    pub notice: Option<String>,
}

impl AdminView {
    pub fn new(users: Vec<UserRecord>, selected: impl Into<String>) -> Self {
        Self {
            users,
            selected: selected.into(),
            notice: None,
        }
    }

    pub fn unavailable(selected: impl Into<String>) -> Self {
        Self {
            users: Vec::new(),
            selected: selected.into(),
            notice: Some(UNREADABLE_CACHE_NOTICE.to_string()),
        }
    }

    /// One line per user, in cache order.
    pub fn rows(&self) -> Vec<String> {
        self.users.iter().map(ToString::to_string).collect()
    }

    /// Placeholder first, then one option per user.
    pub fn options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
        })
        .chain(self.users.iter().map(|user| SelectOption {
            value: user.username.clone(),
            label: user.username.clone(),
        }))
        .collect()
    }

    /// Whether `value` is one of [`options`](Self::options), placeholder included.
    pub fn has_option(&self, value: &str) -> bool {
        value.is_empty() || self.users.iter().any(|user| user.username == value)
    }
}
