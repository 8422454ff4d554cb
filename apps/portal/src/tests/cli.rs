use crate::cli::{Options, new, parse_options};

use portal_core::config::EnvLoadResult;

use log::LevelFilter;
use serial_test::serial;

use std::path::PathBuf;

#[test]
fn given_command_when_built_then_name_and_version_match_package() {
    let command = new();

    assert_eq!(command.get_name(), "portal");
    assert_eq!(
        command.get_version().unwrap().to_string(),
        env!("CARGO_PKG_VERSION")
    );
}

#[test]
fn given_all_flags_when_parsed_then_options_carry_them() {
    let matches = new().get_matches_from(vec![
        "portal",
        "--config-dir",
        "/tmp/portal-config",
        "--data-dir",
        "/tmp/portal-data",
        "--api-url",
        "http://localhost:5000",
        "--path",
        "/admin",
        "--ephemeral",
        "-vv",
    ]);

    let options = Options::from_matches(&matches);

    assert_eq!(options.config_dir, Some(PathBuf::from("/tmp/portal-config")));
    assert_eq!(options.data_dir, Some(PathBuf::from("/tmp/portal-data")));
    assert_eq!(options.api_url.as_deref(), Some("http://localhost:5000"));
    assert_eq!(options.path.as_deref(), Some("/admin"));
    assert!(options.ephemeral);
    assert_eq!(options.stderr_level(), LevelFilter::Debug);
}

#[test]
fn given_no_verbosity_when_parsed_then_stderr_shows_warnings_only() {
    let matches = new().get_matches_from(vec!["portal", "--api-url", "http://x"]);

    let options = Options::from_matches(&matches);

    assert!(!options.ephemeral);
    assert_eq!(options.path, None);
    assert_eq!(options.stderr_level(), LevelFilter::Warn);
}

#[test]
fn given_many_v_flags_when_parsed_then_level_caps_at_trace() {
    let options = Options {
        verbosity: 7,
        ..Options::default()
    };

    assert_eq!(options.stderr_level(), LevelFilter::Trace);
}

#[test]
#[serial]
fn given_env_loader_setting_data_dir_when_options_parsed_then_clap_sees_it() {
    // Stands in for a .env file defining PORTAL_DATA_DIR
    let load_env = || {
        unsafe { std::env::set_var("PORTAL_DATA_DIR", "/tmp/from-dotenv") };
        EnvLoadResult {
            path: Some(PathBuf::from("/tmp/.env")),
            loaded: true,
        }
    };

    let (options, env) = parse_options(load_env, vec!["portal"]);
    unsafe { std::env::remove_var("PORTAL_DATA_DIR") };

    assert!(env.loaded);
    assert_eq!(options.data_dir, Some(PathBuf::from("/tmp/from-dotenv")));
}

#[test]
#[serial]
fn given_flag_and_loaded_env_when_options_parsed_then_flag_wins() {
    let load_env = || {
        unsafe { std::env::set_var("PORTAL_DATA_DIR", "/tmp/from-dotenv") };
        EnvLoadResult {
            path: None,
            loaded: true,
        }
    };

    let (options, _) = parse_options(load_env, vec!["portal", "--data-dir", "/tmp/from-flag"]);
    unsafe { std::env::remove_var("PORTAL_DATA_DIR") };

    assert_eq!(options.data_dir, Some(PathBuf::from("/tmp/from-flag")));
}
