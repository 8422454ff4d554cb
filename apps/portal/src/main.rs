use portal::app::{build_portal, open_storage, prepare_log_dir, resolve_config};
use portal::cli;
use portal::console;
use portal::error::PortalAppError;
use portal::logger::initialize as LoggerInitialize;
use portal::state::PortalState;

use portal_core::config::load_dotenv;

use std::io::stdout;
use std::process::ExitCode;

use log::{error, info};
use tokio::io::{BufReader, stdin};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PortalAppError> {
    // .env first, so it feeds clap's env fallbacks as well as config
    let (options, dotenv) = cli::parse_options(load_dotenv, std::env::args_os());

    let config = resolve_config(&options)?;
    let data_dir = config.data_dir()?;

    // Initialize logger FIRST
    let log_dir = prepare_log_dir(&data_dir)?;
    LoggerInitialize(&log_dir, options.stderr_level())?;

    info!("Portal starting");
    info!("Log directory: {}", log_dir.display());
    if let Some(path) = &dotenv.path {
        info!("Environment loaded from {}", path.display());
    }

    let storage = open_storage(&data_dir, options.ephemeral)?;
    let portal = build_portal(&config, storage, options.path.as_deref())?;
    let state = PortalState::spawn(portal);

    let mut out = stdout();
    console::run(&state, BufReader::new(stdin()), &mut out).await?;

    info!("Portal exiting");
    Ok(())
}
