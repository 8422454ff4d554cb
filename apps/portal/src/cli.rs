use clap::{
    Arg, ArgAction, ArgMatches, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use log::LevelFilter;

use portal_core::config::EnvLoadResult;

use std::ffi::OsString;
use std::path::PathBuf;

/// Startup options after clap has applied flags and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub config_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub path: Option<String>,
    pub ephemeral: bool,
    pub verbosity: u8,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_dir: matches.get_one::<PathBuf>("config-dir").cloned(),
            data_dir: matches.get_one::<PathBuf>("data-dir").cloned(),
            api_url: matches.get_one::<String>("api-url").cloned(),
            path: matches.get_one::<String>("path").cloned(),
            ephemeral: matches.get_flag("ephemeral"),
            verbosity: matches.get_count("verbosity"),
        }
    }

    /// Terminal log level. Warnings only by default, each `-v` adds one level.
    pub fn stderr_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Run `load_env` before parsing `args`, so `.env` values reach clap's
/// environment fallbacks.
pub fn parse_options<I, T>(
    load_env: impl FnOnce() -> EnvLoadResult,
    args: I,
) -> (Options, EnvLoadResult)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let env = load_env();
    let options = Options::from_matches(&new().get_matches_from(args));
    (options, env)
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("portal")
        .about("Register, log in and manage users against an auth server")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding portal.toml")
                .env("PORTAL_CONFIG_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Directory for the session store and logs")
                .env("PORTAL_DATA_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("api-url")
                .short('a')
                .long("api-url")
                .help("Auth server base URL, example: http://localhost:4000"),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .help("Page to open first, example: /admin"),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .help("Keep the session in memory only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Log more to the terminal, repeat for more detail")
                .action(ArgAction::Count),
        )
}
