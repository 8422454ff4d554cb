//! The portal: session, router and server calls behind one `dispatch`.
//!
//! Every failure ends up as an alert string in the returned
//! [`ActionOutcome`]; `dispatch` itself never fails.

pub mod action;

pub use action::{Action, ActionOutcome};

use crate::auth_client::{AuthClient, Operation};
use crate::error::AuthClientError;
use crate::router::{Route, Router};
use crate::session::SessionContext;
use crate::storage::Storage;
use crate::token::TokenVerifier;
use crate::views::{AdminView, Background, NavBar, Page, ViewBody};

use models::{Claims, Credentials};

use log::{debug, error, info, warn};

pub const REGISTRATION_SUCCESS_ALERT: &str = "Registration successful!";
pub const AUTHORIZE_SUCCESS_ALERT: &str = "User authorized successfully";
pub const NOT_AUTHORIZED_ALERT: &str = "You are not authorized to use this button";
pub const SESSION_INVALID_ALERT: &str = "Your session is no longer valid. Please log in again.";
pub const UNAVAILABLE_ALERT: &str = "That action is not available on this page";
pub const UNKNOWN_USER_ALERT: &str = "That user is not in the list";

pub struct Portal<S: Storage> {
    client: AuthClient,
    verifier: TokenVerifier,
    session: SessionContext<S>,
    router: Router,
    form: Credentials,
    selected_user: String,
    background: Background,
}

impl<S: Storage> Portal<S> {
    /// Opens on Protected when the session already holds a token, Home otherwise.
    pub fn new(client: AuthClient, verifier: TokenVerifier, session: SessionContext<S>) -> Self {
        let router = Router::initial(session.is_logged_in());
        Self {
            client,
            verifier,
            session,
            router,
            form: Credentials::default(),
            selected_user: String::new(),
            background: Background::default(),
        }
    }

    /// Open on an explicit path instead, gate applied.
    pub fn starting_at(mut self, path: &str) -> Self {
        self.router = Router::starting_at(path, self.session.is_logged_in());
        self
    }

    pub fn route(&self) -> Route {
        self.router.route()
    }

    pub fn session(&self) -> &SessionContext<S> {
        &self.session
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub async fn dispatch(&mut self, action: Action) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();

        if !action.is_available_on(self.router.route(), self.session.is_logged_in()) {
            debug!("'{}' is not available on {}", action.name(), self.router.route());
            outcome.alert(UNAVAILABLE_ALERT);
            return outcome;
        }

        match action {
            Action::Navigate(path) => self.navigate(&path, &mut outcome),
            Action::SetUsername(username) => self.form.set_username(username),
            Action::SetPassword(password) => self.form.set_password(password),
            Action::Register => self.register(&mut outcome).await,
            Action::Login => self.login(&mut outcome).await,
            Action::SayHello => self.say_hello(&mut outcome),
            Action::ChangeBackground => self.change_background(&mut outcome),
            Action::OpenAdminDashboard => self.open_admin_dashboard(&mut outcome).await,
            Action::SelectUser(username) => self.select_user(username, &mut outcome),
            Action::AuthorizeUser => self.authorize_user(&mut outcome).await,
            Action::GoBack => {
                self.background = Background::Default;
                self.go(Route::Protected, &mut outcome);
            }
            Action::Logout => self.logout(&mut outcome),
            Action::Reload => self.reload(&mut outcome),
        }

        outcome
    }

    /// Build the page for the current route.
    pub fn page(&self) -> Page {
        let logged_in = self.session.is_logged_in();
        let route = self.router.route();

        let body = match route {
            Route::Home if logged_in => ViewBody::Empty,
            Route::Home => ViewBody::Welcome,
            Route::RegisterLogin => ViewBody::RegisterLogin {
                username: self.form.username.clone(),
            },
            Route::Protected => ViewBody::Protected,
            Route::Admin => ViewBody::Admin(self.admin_view()),
            Route::Contact => ViewBody::Contact,
            Route::NotFound => ViewBody::Empty,
        };

        Page {
            route,
            path: self.router.path().to_string(),
            nav: NavBar::new(logged_in),
            body,
            background: self.background,
        }
    }

    fn admin_view(&self) -> AdminView {
        match self.session.cached_users() {
            Ok(Some(users)) => AdminView::new(users, self.selected_user.clone()),
            Ok(None) => AdminView::new(Vec::new(), self.selected_user.clone()),
            Err(e) => {
                warn!("Cannot render admin user list: {}", e);
                AdminView::unavailable(self.selected_user.clone())
            }
        }
    }

    fn navigate(&mut self, path: &str, outcome: &mut ActionOutcome) {
        self.reset_view_state();
        outcome.navigation = Some(self.router.navigate(path, self.session.is_logged_in()));
    }

    fn go(&mut self, route: Route, outcome: &mut ActionOutcome) {
        self.reset_view_state();
        outcome.navigation = Some(self.router.go(route, self.session.is_logged_in()));
    }

    fn reset_view_state(&mut self) {
        self.form.clear();
        self.selected_user.clear();
    }

    async fn register(&mut self, outcome: &mut ActionOutcome) {
        if self.form.is_blank() {
            debug!("Registering with an empty form");
        }
        match self.client.register(&self.form).await {
            Ok(()) => outcome.alert(REGISTRATION_SUCCESS_ALERT),
            Err(e) => outcome.alert(failure_alert(Operation::Register, &e)),
        }
    }

    async fn login(&mut self, outcome: &mut ActionOutcome) {
        if self.form.is_blank() {
            debug!("Logging in with an empty form");
        }
        let token = match self.client.login(&self.form).await {
            Ok(token) => token,
            Err(e) => {
                outcome.alert(failure_alert(Operation::Login, &e));
                return;
            }
        };

        if let Err(e) = self.session.set_session(token) {
            error!("Failed to store session: {}", e);
            outcome.alert(Operation::Login.failure_alert());
            return;
        }

        self.go(Route::Protected, outcome);
    }

    fn say_hello(&mut self, outcome: &mut ActionOutcome) {
        if let Some(claims) = self.verified_claims(outcome) {
            outcome.alert(format!("Hello, {}", claims.username));
        }
    }

    fn change_background(&mut self, outcome: &mut ActionOutcome) {
        let Some(claims) = self.verified_claims(outcome) else {
            return;
        };

        if claims.can_change_background() {
            self.background = Background::Blue;
        } else {
            outcome.alert(NOT_AUTHORIZED_ALERT);
        }
    }

    async fn open_admin_dashboard(&mut self, outcome: &mut ActionOutcome) {
        let Some(token) = self.session.token().map(str::to_string) else {
            self.go(Route::Admin, outcome);
            return;
        };

        match self.client.fetch_admin_dashboard(&token).await {
            Ok(users) => {
                if let Err(e) = self.session.cache_users(&users) {
                    error!("Failed to cache user list: {}", e);
                    outcome.alert(Operation::AdminDashboard.failure_alert());
                    return;
                }
                self.go(Route::Admin, outcome);
            }
            Err(e) => outcome.alert(failure_alert(Operation::AdminDashboard, &e)),
        }
    }

    /// Only a listed user, or the placeholder, can be selected.
    fn select_user(&mut self, username: String, outcome: &mut ActionOutcome) {
        if self.admin_view().has_option(&username) {
            self.selected_user = username;
        } else {
            debug!("'{}' is not a listed user", username);
            outcome.alert(UNKNOWN_USER_ALERT);
        }
    }

    async fn authorize_user(&mut self, outcome: &mut ActionOutcome) {
        let Some(token) = self.session.token().map(str::to_string) else {
            self.go(Route::Admin, outcome);
            return;
        };

        match self.client.authorize_user(&token, &self.selected_user).await {
            Ok(_) => {
                outcome.alert(AUTHORIZE_SUCCESS_ALERT);
                self.reload(outcome);
            }
            Err(e) => outcome.alert(failure_alert(Operation::AuthorizeUser, &e)),
        }
    }

    fn logout(&mut self, outcome: &mut ActionOutcome) {
        if let Err(e) = self.session.clear_session() {
            error!("Failed to remove persisted session: {}", e);
        }
        self.go(Route::Home, outcome);
    }

    /// Full reload: state comes back from storage, view-local state is lost.
    fn reload(&mut self, outcome: &mut ActionOutcome) {
        if let Err(e) = self.session.reload() {
            error!("Failed to reload session: {}", e);
        }
        self.reset_view_state();
        self.background = Background::Default;
        if let Some(navigation) = self.router.revalidate(self.session.is_logged_in()) {
            outcome.navigation = Some(navigation);
        }
        outcome.reloaded = true;
        info!("Reloaded at {}", self.router.path());
    }

    /// Claims for the current token, or `None` after failing closed.
    ///
    /// A token the verifier rejects ends the session and sends the visitor
    /// back to the login form.
    fn verified_claims(&mut self, outcome: &mut ActionOutcome) -> Option<Claims> {
        let Some(token) = self.session.token() else {
            self.go(Route::RegisterLogin, outcome);
            return None;
        };

        match self.verifier.verify(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!("Rejecting session token ({}): {}", e.error_category(), e);
                if let Err(e) = self.session.clear_session() {
                    error!("Failed to remove persisted session: {}", e);
                }
                self.go(Route::RegisterLogin, outcome);
                outcome.alert(SESSION_INVALID_ALERT);
                None
            }
        }
    }
}

/// The server's message when it sent one, the operation's generic text otherwise.
fn failure_alert(operation: Operation, error: &AuthClientError) -> String {
    let operation = error.operation().unwrap_or(operation);
    match error.status_code() {
        Some(status) => warn!(
            "{} failed with HTTP {} ({}): {}",
            operation,
            status,
            error.error_category(),
            error
        ),
        None => warn!("{} failed ({}): {}", operation, error.error_category(), error),
    }
    error
        .server_message()
        .unwrap_or_else(|| operation.failure_alert())
        .to_string()
}
