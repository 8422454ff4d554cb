//! Startup wiring: config, storage and the portal, in that order.

use crate::cli::Options;
use crate::error::PortalAppError;

use portal_core::auth_client::AuthClient;
use portal_core::config::{PortalConfig, default_config_dir};
use portal_core::portal::Portal;
use portal_core::session::SessionContext;
use portal_core::storage::{FileStorage, MemoryStorage, Storage};

use std::path::{Path, PathBuf};

use log::info;

pub type DynStorage = Box<dyn Storage>;

/// Directory for `portal.log`, inside the data directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Load the config file, then apply environment and command-line overrides.
///
/// Precedence, lowest first: defaults, `portal.toml`, environment, flags.
pub fn resolve_config(options: &Options) -> Result<PortalConfig, PortalAppError> {
    let config_dir = match &options.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };

    let mut config = PortalConfig::load(&config_dir)?;
    config.apply_env_overrides()?;

    if let Some(api_url) = &options.api_url {
        config.server.api_url = api_url.clone();
    }
    if let Some(data_dir) = &options.data_dir {
        config.storage.data_dir = Some(data_dir.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Create `{data_dir}/logs` and return it.
pub fn prepare_log_dir(data_dir: &Path) -> Result<PathBuf, PortalAppError> {
    let log_dir = data_dir.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        PortalAppError::portal(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;
    Ok(log_dir)
}

pub fn open_storage(data_dir: &Path, ephemeral: bool) -> Result<DynStorage, PortalAppError> {
    if ephemeral {
        info!("Using in-memory session storage");
        return Ok(Box::new(MemoryStorage::new()));
    }

    let storage = FileStorage::open(data_dir)?;
    info!("Session storage: {}", storage.path().display());
    Ok(Box::new(storage))
}

/// Hydrate the session and assemble the portal, opening on `start_path` when
/// one is given.
pub fn build_portal(
    config: &PortalConfig,
    storage: DynStorage,
    start_path: Option<&str>,
) -> Result<Portal<DynStorage>, PortalAppError> {
    let client = AuthClient::new(&config.server)?;
    info!(
        "Auth server {} (token sent as {:?})",
        client.base_url(),
        client.transport()
    );
    let verifier = config.token_verifier()?;
    let session = SessionContext::hydrate(storage)?;

    let portal = Portal::new(client, verifier, session);
    let portal = match start_path {
        Some(path) => portal.starting_at(path),
        None => portal,
    };

    info!("Portal ready on {}", portal.route());
    Ok(portal)
}
