//! HTTP client for the external authentication server.
//!
//! Four calls, no retries. Every non-2xx answer becomes
//! [`AuthClientError::Rejected`] carrying whatever the server said, so the
//! caller can show it verbatim.

pub mod login_response;

pub use login_response::LoginResponseFormat;

use crate::config::ServerConfig;
use crate::error::AuthClientError;

use common::{ErrorLocation, RedactedSecret};
use models::{Credentials, UserRecord};

use std::fmt;
use std::panic::Location;

use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

const REGISTER_ENDPOINT: &str = "register";
const LOGIN_ENDPOINT: &str = "login";
const ADMIN_DASHBOARD_ENDPOINT: &str = "admin/dashboard";
const ADMIN_AUTHORIZE_ENDPOINT: &str = "admin/authorize";
const TOKEN_QUERY_PARAMETER: &str = "token";

/// How the bearer token travels on the admin endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthTransport {
    /// `Authorization: Bearer <token>`
    #[default]
    BearerHeader,
    /// `?token=<token>`
    QueryParameter,
}

/// The server call an error or log line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    AdminDashboard,
    AuthorizeUser,
}

impl Operation {
    /// Alert shown when the call fails without a usable server message.
    pub fn failure_alert(&self) -> &'static str {
        match self {
            Operation::Register => "An error occurred during registration",
            Operation::Login => "An error occurred during login",
            Operation::AdminDashboard => "An error occurred while accessing admin dashboard",
            Operation::AuthorizeUser => "An error occurred while authorizing user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Register => "register",
            Operation::Login => "login",
            Operation::AdminDashboard => "admin dashboard",
            Operation::AuthorizeUser => "authorize user",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone)]
pub struct AuthClient {
    base_url: Url,
    client: Client,
    transport: AuthTransport,
    login_format: LoginResponseFormat,
}

impl AuthClient {
    pub fn new(config: &ServerConfig) -> Result<Self, AuthClientError> {
        let mut base_url = Url::parse(&config.api_url)?;

        // Without a trailing slash `join` would drop the last path segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AuthClientError::Client {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            base_url,
            client,
            transport: config.auth_transport,
            login_format: config.login_response,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> AuthTransport {
        self.transport
    }

    /// Register a new account. Credentials are sent as typed, unvalidated.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), AuthClientError> {
        let operation = Operation::Register;
        let url = self.base_url.join(REGISTER_ENDPOINT)?;

        let response = send(
            operation,
            self.client.post(url).json(&credentials_body(credentials)),
        )
        .await?;

        let status = response.status();
        let body = read_text(operation, response).await?;

        if !status.is_success() {
            return Err(AuthClientError::rejected(operation, status.as_u16(), body));
        }

        info!("Registered user '{}'", credentials.username);
        Ok(())
    }

    /// Log in and return the issued token.
    pub async fn login(&self, credentials: &Credentials) -> Result<RedactedSecret, AuthClientError> {
        let operation = Operation::Login;
        let url = self.base_url.join(LOGIN_ENDPOINT)?;

        let response = send(
            operation,
            self.client.post(url).json(&credentials_body(credentials)),
        )
        .await?;

        let status = response.status();
        let body = read_text(operation, response).await?;

        if !status.is_success() {
            return Err(AuthClientError::rejected(operation, status.as_u16(), body));
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| AuthClientError::response(operation, format!("body is not JSON: {e}")))?;

        let token = self.login_format.extract_token(&json).ok_or_else(|| {
            AuthClientError::response(
                operation,
                format!("no token found for format {:?}", self.login_format),
            )
        })?;

        info!("Logged in as '{}'", credentials.username);
        Ok(RedactedSecret::new(token))
    }

    /// Fetch the user list behind the admin dashboard.
    pub async fn fetch_admin_dashboard(
        &self,
        token: &str,
    ) -> Result<Vec<UserRecord>, AuthClientError> {
        let operation = Operation::AdminDashboard;
        let url = self.authorized_url(ADMIN_DASHBOARD_ENDPOINT, token)?;

        let request = self.authorize_request(self.client.get(url), token);
        let json = read_admin_json(operation, send(operation, request).await?).await?;

        let users = json
            .get("users")
            .cloned()
            .ok_or_else(|| AuthClientError::response(operation, "response has no 'users' field"))?;

        let users: Vec<UserRecord> = serde_json::from_value(users).map_err(|e| {
            AuthClientError::response(operation, format!("'users' is not a user list: {e}"))
        })?;

        debug!("Admin dashboard returned {} users", users.len());
        Ok(users)
    }

    /// Ask the server to authorize `username`. Returns the server's message, if any.
    pub async fn authorize_user(
        &self,
        token: &str,
        username: &str,
    ) -> Result<Option<String>, AuthClientError> {
        let operation = Operation::AuthorizeUser;
        let url = self.authorized_url(ADMIN_AUTHORIZE_ENDPOINT, token)?;

        let request = self
            .authorize_request(self.client.post(url), token)
            .json(&json!({ "username": username }));
        let json = read_admin_json(operation, send(operation, request).await?).await?;

        info!("Authorized user '{}'", username);
        Ok(message_of(&json))
    }

    fn authorized_url(&self, endpoint: &str, token: &str) -> Result<Url, AuthClientError> {
        let mut url = self.base_url.join(endpoint)?;
        if self.transport == AuthTransport::QueryParameter {
            url.query_pairs_mut()
                .append_pair(TOKEN_QUERY_PARAMETER, token);
        }
        Ok(url)
    }

    fn authorize_request(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        match self.transport {
            AuthTransport::BearerHeader => request.bearer_auth(token),
            AuthTransport::QueryParameter => request,
        }
    }
}

fn credentials_body(credentials: &Credentials) -> Value {
    json!({
        "username": credentials.username,
        "password": credentials.password.as_str(),
    })
}

fn message_of(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

async fn send(operation: Operation, request: RequestBuilder) -> Result<Response, AuthClientError> {
    request.send().await.map_err(|e| {
        warn!("{} request failed: {}", operation, e);
        AuthClientError::from_reqwest(operation, &e)
    })
}

async fn read_text(operation: Operation, response: Response) -> Result<String, AuthClientError> {
    response
        .text()
        .await
        .map_err(|e| AuthClientError::from_reqwest(operation, &e))
}

/// Admin endpoints answer JSON on both paths. A rejection without a readable
/// `message` keeps an empty message; a success with an unreadable body is only
/// tolerated when the body is empty.
async fn read_admin_json(operation: Operation, response: Response) -> Result<Value, AuthClientError> {
    let status = response.status();
    let body = read_text(operation, response).await?;
    let parsed = serde_json::from_str::<Value>(&body);

    if !status.is_success() {
        let message = parsed.ok().as_ref().and_then(message_of).unwrap_or_default();
        return Err(AuthClientError::rejected(operation, status.as_u16(), message));
    }

    match parsed {
        Ok(json) => Ok(json),
        Err(_) if body.trim().is_empty() => Ok(Value::Null),
        Err(e) => Err(AuthClientError::response(
            operation,
            format!("body is not JSON: {e}"),
        )),
    }
}
