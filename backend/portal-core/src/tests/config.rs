// Unit tests for PortalConfig.
// Tests that touch process environment are #[serial].

use crate::DEFAULT_API_URL;
use crate::auth_client::{AuthTransport, LoginResponseFormat};
use crate::config::{API_URL_ENV, PortalConfig};
use crate::error::ConfigError;
use crate::token::VerificationMode;

use serial_test::serial;
use tempfile::TempDir;

const TEST_SECRET_ENV: &str = "PORTAL_TEST_TOKEN_SECRET";

#[test]
fn given_empty_document_when_parsed_then_defaults_apply() {
    let config = PortalConfig::from_toml_str("").unwrap();

    assert_eq!(config, PortalConfig::default());
    assert_eq!(config.server.api_url, DEFAULT_API_URL);
    assert_eq!(config.server.request_timeout_secs, 30);
    assert_eq!(config.server.auth_transport, AuthTransport::BearerHeader);
    assert_eq!(config.token.verification, VerificationMode::DecodeOnly);
}

#[test]
fn given_full_document_when_parsed_then_every_field_is_read() {
    let toml = r#"
        version = 1

        [server]
        api_url = "https://auth.example.com"
        request_timeout_secs = 5
        auth_transport = "query_parameter"
        login_response = "delimited_text"

        [token]
        verification = "hs256"
        secret_env = "MY_SECRET"

        [storage]
        data_dir = "/tmp/portal-data"
    "#;

    let config = PortalConfig::from_toml_str(toml).unwrap();

    assert_eq!(config.server.api_url, "https://auth.example.com");
    assert_eq!(config.server.request_timeout().as_secs(), 5);
    assert_eq!(config.server.auth_transport, AuthTransport::QueryParameter);
    assert_eq!(config.server.login_response, LoginResponseFormat::DelimitedText);
    assert_eq!(config.token.verification, VerificationMode::Hs256);
    assert_eq!(config.token.secret_env, "MY_SECRET");
    assert_eq!(
        config.data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/portal-data")
    );
}

#[test]
fn given_invalid_values_when_validated_then_validation_error() {
    let cases = [
        "version = 2",
        "[server]\napi_url = \"ftp://example.com\"",
        "[server]\nrequest_timeout_secs = 0",
        "[server]\nrequest_timeout_secs = 301",
        "[token]\nverification = \"hs256\"\nsecret_env = \"\"",
    ];

    for case in cases {
        let result = PortalConfig::from_toml_str(case);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "expected validation error for {case:?}, got {result:?}"
        );
    }
}

#[test]
fn given_malformed_toml_when_parsed_then_parse_error() {
    let result = PortalConfig::from_toml_str("[server\napi_url = ");

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_missing_file_when_loaded_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = PortalConfig::load(dir.path()).unwrap();

    assert_eq!(config, PortalConfig::default());
}

/// **VALUE**: A saved config loads back unchanged and leaves no temp file.
///
/// **BUG THIS CATCHES**: Would catch a non-default enum being serialized in a
/// form the loader cannot read back.
#[test]
fn given_saved_config_when_loaded_then_values_match() {
    // GIVEN: A config with non-default values
    let dir = TempDir::new().unwrap();
    let mut config = PortalConfig::default();
    config.server.api_url = "http://127.0.0.1:9999".to_string();
    config.server.auth_transport = AuthTransport::QueryParameter;
    config.server.login_response = LoginResponseFormat::DelimitedText;

    // WHEN: Saving and loading again
    config.save(dir.path()).unwrap();
    let loaded = PortalConfig::load(dir.path()).unwrap();

    // THEN: Nothing was lost
    assert_eq!(loaded, config);
    assert!(!dir.path().join("portal.toml.tmp").exists());
}

#[test]
fn given_corrupt_file_when_loaded_then_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("portal.toml"), "version = \"one\"").unwrap();

    let result = PortalConfig::load(dir.path());

    match result {
        Err(ConfigError::ParseError { path, .. }) => {
            assert_eq!(path, dir.path().join("portal.toml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_api_url_env_when_overrides_applied_then_env_wins() {
    // SAFETY: serialized with every other env-mutating test
    unsafe { std::env::set_var(API_URL_ENV, "https://override.example.com") };

    let mut config = PortalConfig::default();
    let result = config.apply_env_overrides();

    unsafe { std::env::remove_var(API_URL_ENV) };

    result.unwrap();
    assert_eq!(config.server.api_url, "https://override.example.com");
}

#[test]
#[serial]
fn given_invalid_api_url_env_when_overrides_applied_then_validation_error() {
    unsafe { std::env::set_var(API_URL_ENV, "localhost:4000") };

    let mut config = PortalConfig::default();
    let result = config.apply_env_overrides();

    unsafe { std::env::remove_var(API_URL_ENV) };

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
#[serial]
fn given_hs256_without_secret_when_verifier_built_then_env_error() {
    unsafe { std::env::remove_var(TEST_SECRET_ENV) };

    let mut config = PortalConfig::default();
    config.token.verification = VerificationMode::Hs256;
    config.token.secret_env = TEST_SECRET_ENV.to_string();

    let result = config.token_verifier();

    match result {
        Err(ConfigError::EnvError { variable, .. }) => assert_eq!(variable, TEST_SECRET_ENV),
        Err(other) => panic!("expected env error, got {other:?}"),
        Ok(_) => panic!("expected env error, got a verifier"),
    }
}

#[test]
#[serial]
fn given_hs256_with_secret_when_verifier_built_then_mode_is_hs256() {
    unsafe { std::env::set_var(TEST_SECRET_ENV, "test-secret") };

    let mut config = PortalConfig::default();
    config.token.verification = VerificationMode::Hs256;
    config.token.secret_env = TEST_SECRET_ENV.to_string();
    let result = config.token_verifier();

    unsafe { std::env::remove_var(TEST_SECRET_ENV) };

    assert_eq!(result.unwrap().mode(), VerificationMode::Hs256);
}

#[test]
fn given_default_config_when_verifier_built_then_decode_only() {
    let verifier = PortalConfig::default().token_verifier().unwrap();

    assert_eq!(verifier.mode(), VerificationMode::DecodeOnly);
}
