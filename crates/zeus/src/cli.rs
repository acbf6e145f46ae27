//! Command-line interface for the Zeus host.
//!
//! Parses the options that locate the configuration file and override
//! individual settings from it.

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

/// Command line arguments parsed from user input.
///
/// Every field except `config_path` overrides the matching configuration
/// file setting when present.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Path to the configuration file
    pub config_path: PathBuf,
    /// Optional override for the mod manifest path
    pub manifest_path: Option<PathBuf>,
    /// Optional override for the package root directory
    pub root_dir: Option<PathBuf>,
    /// Optional override for log level
    pub log_level: Option<String>,
    /// Whether to force JSON diagnostics output
    pub json_logs: bool,
    /// Optional override for where `[ZEUS]` lines go
    pub sink: Option<String>,
}

/// Builds the clap command describing every option.
pub fn command() -> Command {
    Command::new("zeus")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Zeus Development Team")
        .about("Mission scripting and administrative framework host")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("zeus.toml"),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .value_name("FILE")
                .help("Mod manifest path"),
        )
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .help("Package root the script module paths are resolved against"),
        )
        .arg(
            Arg::new("log-level")
                .short('l')
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Output diagnostics in JSON format")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("sink")
                .long("sink")
                .value_name("SINK")
                .help("Destination for [ZEUS] lines (console, tracing)"),
        )
}

impl CliArgs {
    /// Parses the process arguments. Exits with usage on invalid input.
    pub fn parse() -> Self {
        Self::from_matches(&command().get_matches())
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config_path: matches
                .get_one::<String>("config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("zeus.toml")),
            manifest_path: matches.get_one::<String>("manifest").map(PathBuf::from),
            root_dir: matches.get_one::<String>("root").map(PathBuf::from),
            log_level: matches.get_one::<String>("log-level").cloned(),
            json_logs: matches.get_flag("json-logs"),
            sink: matches.get_one::<String>("sink").cloned(),
        }
    }
}
