//! `.env` loading and environment lookups.

use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Result of attempting to load .env file.
#[derive(Debug)]
pub struct EnvLoadResult {
    /// Path to loaded .env file, if found.
    pub path: Option<PathBuf>,
    /// Whether any .env file was loaded.
    pub loaded: bool,
}

/// Attempts to load .env from the working directory, then from next to the
/// executable. A missing file is not an error.
pub fn load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    if let Ok(exe_path) = env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(_) => {
                    info!("Loaded .env from: {:?}", env_path);
                    return EnvLoadResult {
                        path: Some(env_path),
                        loaded: true,
                    };
                }
                Err(e) => {
                    warn!("Failed to parse .env at {:?}: {}", env_path, e);
                }
            }
        }
    }

    debug!("No .env file found - using process environment only");
    EnvLoadResult {
        path: None,
        loaded: false,
    }
}

/// Read a variable. Unset or blank is `None`; non-unicode is an error.
pub(crate) fn read_var(name: &str) -> Result<Option<String>, ConfigError> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvError {
            location: ErrorLocation::from(Location::caller()),
            variable: name.to_string(),
            reason: "contains invalid unicode".to_string(),
        }),
    }
}
