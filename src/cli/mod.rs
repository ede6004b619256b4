//! CLI module for gol
//!
//! Provides the command-line interface:
//! - query: one-shot GOQL query to stdout
//! - server: HTTP query gateway
//! - info, check: library metadata and integrity
//! - get, dump: optional tiers, enabled through `GOL_FEATURES`
//!
//! `gol` without a command prints help; see [`default`].

mod args;
mod commands;
mod default;
mod errors;
mod registry;

pub use args::{
    BaseArgs, CheckArgs, DefaultArgs, DumpArgs, GetArgs, InfoArgs, QueryArgs, ServerArgs,
};
pub use commands::{check, dump, get, info, parse_feature_id, query, server, write_info};
pub use default::{help_text, version_text};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use registry::{CommandEntry, CommandRegistry, FeatureSet, FeatureTier, FEATURES_ENV};

use crate::observability;

/// Run gol with the process arguments and return the exit code
pub fn run(argv: &[String]) -> i32 {
    observability::init_from_env();
    CommandRegistry::new(FeatureSet::from_env()).run(argv)
}
