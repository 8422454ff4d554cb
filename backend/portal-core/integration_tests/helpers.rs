//! Shared setup for the portal integration tests.
//!
//! Every test gets its own `MockServer`, so tests run in parallel without
//! sharing ports or state.

use portal_core::auth_client::{AuthClient, AuthTransport, LoginResponseFormat};
use portal_core::config::ServerConfig;
use portal_core::session::SessionContext;
use portal_core::storage::{MemoryStorage, TOKEN_KEY};
use portal_core::{Portal, TokenVerifier};

use models::Claims;

use jsonwebtoken::{EncodingKey, Header, encode};
use wiremock::MockServer;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn server_config(api_url: &str, transport: AuthTransport) -> ServerConfig {
    ServerConfig {
        api_url: api_url.to_string(),
        request_timeout_secs: 5,
        auth_transport: transport,
        login_response: LoginResponseFormat::TokenField,
    }
}

pub fn client_for(server: &MockServer, transport: AuthTransport) -> AuthClient {
    AuthClient::new(&server_config(&server.uri(), transport)).expect("client builds")
}

/// An HS256 token signed with [`TEST_SECRET`].
pub fn mint_token(claims: &Claims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encodes")
}

/// A logged-out portal talking to `server`.
pub fn portal_for(server: &MockServer) -> Portal<MemoryStorage> {
    portal_with_storage(server, MemoryStorage::new())
}

/// A portal whose storage already holds `token`, as after a previous login.
pub fn logged_in_portal(server: &MockServer, token: &str) -> Portal<MemoryStorage> {
    portal_with_storage(server, MemoryStorage::new().with_entry(TOKEN_KEY, token))
}

pub fn portal_with_storage(server: &MockServer, storage: MemoryStorage) -> Portal<MemoryStorage> {
    portal_at(&server.uri(), storage)
}

/// A portal whose client points at `api_url`, reachable or not.
pub fn portal_at(api_url: &str, storage: MemoryStorage) -> Portal<MemoryStorage> {
    let client = AuthClient::new(&server_config(api_url, AuthTransport::BearerHeader))
        .expect("client builds");
    let session = SessionContext::hydrate(storage).expect("memory storage never fails");
    Portal::new(client, TokenVerifier::decode_only(), session)
}
