use crate::router::{Navigation, Route};

/// Everything a visitor can do, one variant per button, input or link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(String),
    SetUsername(String),
    SetPassword(String),
    Register,
    Login,
    SayHello,
    ChangeBackground,
    OpenAdminDashboard,
    SelectUser(String),
    AuthorizeUser,
    GoBack,
    Logout,
    Reload,
}

impl Action {
    /// Whether the control behind this action is on screen at `route`.
    pub fn is_available_on(&self, route: Route, logged_in: bool) -> bool {
        match self {
            Action::Navigate(_) | Action::Reload => true,
            Action::SetUsername(_) | Action::SetPassword(_) | Action::Register | Action::Login => {
                route == Route::RegisterLogin
            }
            Action::SayHello | Action::ChangeBackground | Action::OpenAdminDashboard => {
                route == Route::Protected
            }
            Action::SelectUser(_) | Action::AuthorizeUser | Action::GoBack => route == Route::Admin,
            Action::Logout => logged_in,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::SetUsername(_) => "set username",
            Action::SetPassword(_) => "set password",
            Action::Register => "register",
            Action::Login => "login",
            Action::SayHello => "say hello",
            Action::ChangeBackground => "change background",
            Action::OpenAdminDashboard => "admin dashboard",
            Action::SelectUser(_) => "select user",
            Action::AuthorizeUser => "authorize user",
            Action::GoBack => "go back",
            Action::Logout => "logout",
            Action::Reload => "reload",
        }
    }
}

/// What an action produced besides the state change itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Blocking messages for the visitor, in order.
    pub alerts: Vec<String>,
    /// Set when the action ended in a full reload.
    pub reloaded: bool,
    /// Last navigation the action caused, if any.
    pub navigation: Option<Navigation>,
}

impl ActionOutcome {
    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}
