//! Command registry
//!
//! Maps a command name to its handler. The set of commands is fixed at
//! start-up from a [`FeatureSet`]: commands of a disabled tier are never
//! registered and resolve like any other unknown name.
//!
//! The registry is the error boundary of the CLI. Whatever escapes a
//! handler, error or panic, becomes one failure line and exit code 1.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::observability::{log_event_with_fields, Event};

use super::args::command_position;
use super::commands;
use super::default;
use super::errors::{CliError, CliResult};

/// Environment variable listing the enabled optional tiers
pub const FEATURES_ENV: &str = "GOL_FEATURES";

/// Handler of one command; receives the full argv
pub type CommandHandler = fn(&[String]) -> CliResult<()>;

/// Availability class of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTier {
    /// Always available
    Standard,
    /// Available with `experimental` in `GOL_FEATURES`
    Experimental,
    /// Available with `diagnostics` in `GOL_FEATURES`
    Diagnostics,
}

/// Which optional tiers are enabled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureSet {
    pub experimental: bool,
    pub diagnostics: bool,
}

impl FeatureSet {
    /// Standard commands only
    pub fn standard() -> Self {
        Self::default()
    }

    /// Every tier enabled
    pub fn all() -> Self {
        Self {
            experimental: true,
            diagnostics: true,
        }
    }

    /// Read `GOL_FEATURES`; unset means standard only
    pub fn from_env() -> Self {
        std::env::var(FEATURES_ENV)
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    /// Parse a comma-separated tier list; unknown names are ignored
    pub fn parse(value: &str) -> Self {
        let mut features = Self::default();
        for name in value.split(',').map(str::trim) {
            match name {
                "experimental" => features.experimental = true,
                "diagnostics" => features.diagnostics = true,
                "all" => features = Self::all(),
                _ => {}
            }
        }
        features
    }

    pub fn enables(&self, tier: FeatureTier) -> bool {
        match tier {
            FeatureTier::Standard => true,
            FeatureTier::Experimental => self.experimental,
            FeatureTier::Diagnostics => self.diagnostics,
        }
    }
}

/// One registered command
#[derive(Clone, Copy)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: FeatureTier,
    pub handler: CommandHandler,
}

/// Every command gol knows, in help order
pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "check",
        description: "Verify integrity",
        tier: FeatureTier::Standard,
        handler: commands::check,
    },
    CommandEntry {
        name: "dump",
        description: "Dump every feature of a library",
        tier: FeatureTier::Diagnostics,
        handler: commands::dump,
    },
    CommandEntry {
        name: "get",
        description: "Print a single feature by id",
        tier: FeatureTier::Experimental,
        handler: commands::get,
    },
    CommandEntry {
        name: "info",
        description: "Obtain metadata and statistics",
        tier: FeatureTier::Standard,
        handler: commands::info,
    },
    CommandEntry {
        name: "query",
        description: "Perform a GOQL query",
        tier: FeatureTier::Standard,
        handler: commands::query,
    },
    CommandEntry {
        name: "server",
        description: "Serve an HTTP API",
        tier: FeatureTier::Standard,
        handler: commands::server,
    },
];

/// Name-to-handler table built once at start-up
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    /// Registry of the built-in commands enabled by `features`
    pub fn new(features: FeatureSet) -> Self {
        Self::with_entries(COMMANDS, features)
    }

    pub fn with_entries(entries: &[CommandEntry], features: FeatureSet) -> Self {
        Self {
            entries: entries
                .iter()
                .filter(|entry| features.enables(entry.tier))
                .copied()
                .collect(),
        }
    }

    /// Exact, case-sensitive lookup
    pub fn lookup(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Run the command named in `argv` and return the exit code
    pub fn run(&self, argv: &[String]) -> i32 {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(argv)));
        let err = match outcome {
            Ok(Ok(())) => return 0,
            Ok(Err(err)) => err,
            Err(payload) => CliError::panicked(panic_message(payload.as_ref())),
        };
        log_event_with_fields(
            Event::CommandFailed,
            &[("code", err.code_str()), ("message", err.message())],
        );
        eprintln!("{}", err);
        1
    }

    fn dispatch(&self, argv: &[String]) -> CliResult<()> {
        let Some(pos) = command_position(argv) else {
            return default::run(argv, self);
        };
        let name = argv[pos].as_str();
        let entry = self
            .lookup(name)
            .ok_or_else(|| CliError::unknown_command(name))?;
        (entry.handler)(argv)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "command panicked".to_string()
    }
}
