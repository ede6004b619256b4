//! CLI argument definitions using clap
//!
//! Commands:
//! - gol query <library> [<goql>] [-f <format>] [-b <bbox>] [-a <area>]
//! - gol server <library> [-p <port>] [--cors <origin>] [--host <addr>]
//! - gol info <library>
//! - gol check <library>
//! - gol get <library> <id>
//! - gol dump <library>
//!
//! Each command parses its own arguments; the registry only picks the
//! command by name.

use std::path::PathBuf;

use clap::error::ErrorKind as ClapKind;
use clap::{Args, Parser};

use crate::http_server::ServerConfig;
use crate::observability::{Logger, Severity};
use crate::query::DEFAULT_PRECISION;

use super::errors::CliResult;

/// Options shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseArgs {
    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log everything, including trace events
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl BaseArgs {
    /// Adjust the log level; without either flag `GOL_LOG` stays in effect
    pub fn apply(&self) {
        if self.quiet {
            Logger::disable();
        } else if self.verbose {
            Logger::set_min_severity(Severity::Trace);
        }
    }
}

/// Options of `gol` without a command
#[derive(Parser, Debug, Default)]
#[command(name = "gol", disable_help_flag = true, disable_version_flag = true)]
pub struct DefaultArgs {
    /// Print the version
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Print this help
    #[arg(short, long)]
    pub help: bool,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Perform a GOQL query
#[derive(Parser, Debug)]
#[command(name = "query")]
pub struct QueryArgs {
    /// Library file
    pub library: PathBuf,

    /// GOQL query (default: every feature)
    #[arg(default_value = "")]
    pub query: String,

    /// Output format: geojson, geojsonl, brief, count, csv, list, wkt, xml
    #[arg(short, long, default_value = "list")]
    pub format: String,

    /// Bounding box as west,south,east,north
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub bbox: String,

    /// Polygon restricting the results (coordinate list, WKT or GeoJSON)
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    pub area: String,

    /// Comma-separated tag keys to include
    #[arg(short, long, default_value = "")]
    pub keys: String,

    /// Digits after the decimal point
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Serve an HTTP API
#[derive(Parser, Debug)]
#[command(name = "server")]
pub struct ServerArgs {
    /// Library file
    pub library: PathBuf,

    /// Port to listen on (default: 8000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Value of Access-Control-Allow-Origin (default: *)
    #[arg(long)]
    pub cors: Option<String>,

    /// Address to bind (default: 0.0.0.0)
    #[arg(long)]
    pub host: Option<String>,

    /// Run requests concurrently instead of one at a time
    #[arg(long)]
    pub concurrent: bool,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub base: BaseArgs,
}

impl ServerArgs {
    /// The configuration file (or defaults) with flags applied on top
    pub fn server_config(&self) -> crate::GolResult<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(cors) = &self.cors {
            config.cors_origin = cors.clone();
        }
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if self.concurrent {
            config.serialize_requests = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Obtain metadata and statistics
#[derive(Parser, Debug)]
#[command(name = "info")]
pub struct InfoArgs {
    /// Library file
    pub library: PathBuf,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Verify integrity
#[derive(Parser, Debug)]
#[command(name = "check")]
pub struct CheckArgs {
    /// Library file
    pub library: PathBuf,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Print a single feature by id
#[derive(Parser, Debug)]
#[command(name = "get")]
pub struct GetArgs {
    /// Library file
    pub library: PathBuf,

    /// Feature id, as N123, W45, R6 or node/123
    pub id: String,

    /// Digits after the decimal point
    #[arg(long, default_value_t = DEFAULT_PRECISION)]
    pub precision: usize,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Dump every feature of a library
#[derive(Parser, Debug)]
#[command(name = "dump")]
pub struct DumpArgs {
    /// Library file
    pub library: PathBuf,

    #[command(flatten)]
    pub base: BaseArgs,
}

/// Index of the command token: the first non-option argument after argv[0]
pub fn command_position(argv: &[String]) -> Option<usize> {
    argv.iter()
        .skip(1)
        .position(|arg| !arg.starts_with('-'))
        .map(|i| i + 1)
}

/// Parse `argv` for one command, the command token removed
///
/// Returns `None` when clap printed help instead.
pub fn parse_args<T: Parser>(argv: &[String]) -> CliResult<Option<T>> {
    let mut args: Vec<String> = argv.iter().skip(1).cloned().collect();
    let bin = match command_position(argv) {
        Some(pos) => format!("gol {}", args.remove(pos - 1)),
        None => "gol".to_string(),
    };

    match T::try_parse_from(std::iter::once(bin).chain(args)) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if matches!(e.kind(), ClapKind::DisplayHelp | ClapKind::DisplayVersion) => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
