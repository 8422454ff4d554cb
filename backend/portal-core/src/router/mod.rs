//! Path → view mapping with the session gate.

use std::fmt;

use log::{debug, info};

pub const HOME_PATH: &str = "/";
pub const REGISTER_PATH: &str = "/register";
pub const PROTECTED_PATH: &str = "/protected";
pub const ADMIN_PATH: &str = "/admin";
pub const CONTACT_PATH: &str = "/contact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    RegisterLogin,
    Protected,
    Admin,
    Contact,
    NotFound,
}

impl Route {
    /// Match a path. Query strings, fragments and a trailing slash are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();

        let path = match path.trim_end_matches('/') {
            "" => HOME_PATH,
            trimmed => trimmed,
        };

        match path {
            HOME_PATH => Route::Home,
            REGISTER_PATH => Route::RegisterLogin,
            PROTECTED_PATH => Route::Protected,
            ADMIN_PATH => Route::Admin,
            CONTACT_PATH => Route::Contact,
            _ => Route::NotFound,
        }
    }

    /// Canonical path. `None` for [`Route::NotFound`].
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Home => Some(HOME_PATH),
            Route::RegisterLogin => Some(REGISTER_PATH),
            Route::Protected => Some(PROTECTED_PATH),
            Route::Admin => Some(ADMIN_PATH),
            Route::Contact => Some(CONTACT_PATH),
            Route::NotFound => None,
        }
    }

    /// Views that bounce visitors without a token.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Protected | Route::Admin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Route::Home => "Home",
            Route::RegisterLogin => "Register/Login",
            Route::Protected => "Protected",
            Route::Admin => "Admin",
            Route::Contact => "Contact",
            Route::NotFound => "Not Found",
        };
        write!(f, "{name}")
    }
}

/// Where a navigation was headed and where it ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub requested: Route,
    pub landed: Route,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.landed
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    route: Route,
    path: String,
}

impl Router {
    /// Start on Protected when a session was restored, Home otherwise.
    pub fn initial(logged_in: bool) -> Self {
        let route = if logged_in {
            Route::Protected
        } else {
            Route::Home
        };

        Self {
            route,
            path: route.path().unwrap_or(HOME_PATH).to_string(),
        }
    }

    /// Start on an explicit path, gate applied.
    pub fn starting_at(path: &str, logged_in: bool) -> Self {
        let mut router = Self::initial(logged_in);
        router.navigate(path, logged_in);
        router
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn navigate(&mut self, path: &str, logged_in: bool) -> Navigation {
        let requested = Route::from_path(path);
        self.enter(requested, path, logged_in)
    }

    pub fn go(&mut self, route: Route, logged_in: bool) -> Navigation {
        self.enter(route, route.path().unwrap_or(HOME_PATH), logged_in)
    }

    /// Re-apply the gate to the current view after the session changed.
    pub fn revalidate(&mut self, logged_in: bool) -> Option<Navigation> {
        if self.route.requires_session() && !logged_in {
            Some(self.go(self.route, logged_in))
        } else {
            None
        }
    }

    fn enter(&mut self, requested: Route, path: &str, logged_in: bool) -> Navigation {
        let landed = if requested.requires_session() && !logged_in {
            info!("No session for {}, redirecting to {}", requested, REGISTER_PATH);
            Route::RegisterLogin
        } else {
            requested
        };

        self.path = match landed.path() {
            Some(canonical) => canonical.to_string(),
            None => path.to_string(),
        };
        self.route = landed;
        debug!("Now at {} ({})", self.path, self.route);

        Navigation { requested, landed }
    }
}
