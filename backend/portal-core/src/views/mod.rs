//! What each route shows, as plain data.
//!
//! A [`Page`] is rebuilt from portal state on demand; the front-end decides
//! how to draw it. `Display` gives the terminal rendering.

pub mod admin;

pub use admin::{AdminView, SelectOption};

use crate::router::{CONTACT_PATH, HOME_PATH, REGISTER_PATH, Route};

use std::fmt;

/// Page-level background colour, the one visible effect of a permission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Background {
    #[default]
    Default,
    Blue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLink {
    Logout,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBar {
    pub links: Vec<(&'static str, &'static str)>,
    pub session_link: SessionLink,
}

impl NavBar {
    pub fn new(logged_in: bool) -> Self {
        Self {
            links: vec![("Home", HOME_PATH), ("Contact", CONTACT_PATH)],
            session_link: if logged_in {
                SessionLink::Logout
            } else {
                SessionLink::Register
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Welcome,
    RegisterLogin { username: String },
    Protected,
    Admin(AdminView),
    Contact,
    Empty,
}

pub const PROTECTED_BUTTONS: [&str; 3] = ["Say Hello", "Admin Dashboard", "Change Background"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub route: Route,
    pub path: String,
    pub nav: NavBar,
    pub body: ViewBody,
    pub background: Background,
}

impl Page {
    pub fn admin_view(&self) -> Option<&AdminView> {
        match &self.body {
            ViewBody::Admin(view) => Some(view),
            _ => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<String> = self
            .nav
            .links
            .iter()
            .map(|(label, _)| format!("[{label}]"))
            .collect();
        let session = match self.nav.session_link {
            SessionLink::Logout => "[Logout]".to_string(),
            SessionLink::Register => format!("[Register -> {REGISTER_PATH}]"),
        };
        writeln!(f, "{} | {}", links.join(" "), session)?;
        writeln!(f, "-- {} --", self.path)?;

        match &self.body {
            ViewBody::Welcome => writeln!(f, "Welcome")?,
            ViewBody::RegisterLogin { username } => {
                writeln!(f, "Register")?;
                writeln!(f, "Login")?;
                if !username.is_empty() {
                    writeln!(f, "  username: {username}")?;
                }
            }
            ViewBody::Protected => {
                writeln!(f, "Protected Page")?;
                let buttons: Vec<String> =
                    PROTECTED_BUTTONS.iter().map(|b| format!("({b})")).collect();
                writeln!(f, "  {}", buttons.join(" "))?;
            }
            ViewBody::Admin(view) => {
                writeln!(f, "Admin Dashboard")?;
                writeln!(f, "Users List")?;
                if let Some(notice) = &view.notice {
                    writeln!(f, "  {notice}")?;
                }
                for row in view.rows() {
                    writeln!(f, "  {row}")?;
                }
                let options: Vec<String> = view
                    .options()
                    .into_iter()
                    .map(|option| {
                        if option.value == view.selected {
                            format!("<{}>", option.label)
                        } else {
                            option.label
                        }
                    })
                    .collect();
                writeln!(f, "  options: {}", options.join(" | "))?;
                let selected = if view.selected.is_empty() {
                    admin::SELECT_PLACEHOLDER
                } else {
                    view.selected.as_str()
                };
                writeln!(f, "  selected: {selected}")?;
                writeln!(f, "  (Authorize User) (Go Back)")?;
            }
            ViewBody::Contact => writeln!(f, "Contact us")?,
            ViewBody::Empty => {}
        }

        if self.background == Background::Blue {
            writeln!(f, "background: blue")?;
        }
        Ok(())
    }
}
