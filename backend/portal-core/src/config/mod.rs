pub mod env;

pub use env::{EnvLoadResult, load_dotenv};

use crate::auth_client::{AuthTransport, LoginResponseFormat};
use crate::error::config::ConfigError;
use crate::token::{TokenVerifier, VerificationMode};
use crate::{APP_NAME, DEFAULT_API_URL};

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "portal.toml";
const CONFIG_VERSION: u32 = 1;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding `server.api_url`.
pub const API_URL_ENV: &str = "PORTAL_API_URL";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub auth_transport: AuthTransport,
    #[serde(default)]
    pub login_response: LoginResponseFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            auth_transport: AuthTransport::default(),
            login_response: LoginResponseFormat::default(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default)]
    pub verification: VerificationMode,
    /// Name of the environment variable holding the hs256 secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            verification: VerificationMode::default(),
            secret_env: default_secret_env(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            token: TokenConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_secret_env() -> String {
    "PORTAL_TOKEN_SECRET".to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl PortalConfig {
    /// Load config from {config_dir}/portal.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(PortalConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config = Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::ParseError {
                location, reason, ..
            } => ConfigError::ParseError {
                location,
                path: config_path.clone(),
                reason,
            },
            other => other,
        })?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: PortalConfig = toml::from_str(contents).map_err(|e| {
            warn!("Failed to parse config TOML: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: PathBuf::from(CONFIG_FILE_NAME),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save config to {config_dir}/portal.toml using atomic write.
    ///
    /// Uses temp file + rename for atomicity (no corruption on crash).
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, contents).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename (POSIX guarantees atomicity)
        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let url = &self.server.api_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid api_url: '{}' (must be http or https)", url),
            });
        }

        if url::Url::parse(url).is_err() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid api_url: '{}'", url),
            });
        }

        let timeout = self.server.request_timeout_secs;
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&timeout) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid request_timeout_secs: {} (must be {}-{})",
                    timeout, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
                ),
            });
        }

        if self.token.verification == VerificationMode::Hs256 && self.token.secret_env.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "token.secret_env is required for hs256 verification".to_string(),
            });
        }

        Ok(())
    }

    /// Apply `PORTAL_API_URL` on top of the file values, then re-validate.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(api_url) = env::read_var(API_URL_ENV)? {
            info!("Using api_url from {}", API_URL_ENV);
            self.server.api_url = api_url;
        }
        self.validate()
    }

    /// Build the verifier this config asks for.
    ///
    /// hs256 reads its secret from the environment variable named by
    /// `token.secret_env`; a missing secret is a configuration error.
    pub fn token_verifier(&self) -> Result<TokenVerifier, ConfigError> {
        match self.token.verification {
            VerificationMode::DecodeOnly => {
                warn!(
                    "Token claims are decoded without signature verification; \
                     client-side checks are cosmetic"
                );
                Ok(TokenVerifier::decode_only())
            }
            VerificationMode::Hs256 => {
                let secret = env::read_var(&self.token.secret_env)?.ok_or_else(|| {
                    ConfigError::EnvError {
                        location: ErrorLocation::from(Location::caller()),
                        variable: self.token.secret_env.clone(),
                        reason: "not set".to_string(),
                    }
                })?;

                TokenVerifier::hs256(RedactedSecret::new(secret)).map_err(|e| {
                    ConfigError::ValidationError {
                        location: ErrorLocation::from(Location::caller()),
                        reason: e.to_string(),
                    }
                })
            }
        }
    }

    /// Data directory: explicit setting, else the platform data dir.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// `{platform config dir}/auth-portal`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
            what: "platform config directory".to_string(),
        })
}

/// `{platform data dir}/auth-portal`.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
            what: "platform data directory".to_string(),
        })
}
