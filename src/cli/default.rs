//! `gol` without a command: version and help.

use std::io::{self, Write};

use super::args::{parse_args, DefaultArgs};
use super::errors::CliResult;
use super::registry::CommandRegistry;

const USAGE: &str = "gol [-V|--version] [-h|--help] <command> [<options>]";

const DESCRIPTION: &str = "Build, manage and query Geo-Object Libraries.";

/// `gol <version>`
pub fn version_text() -> String {
    format!("gol {}", env!("CARGO_PKG_VERSION"))
}

/// Usage, description and the commands enabled in `registry`
pub fn help_text(registry: &CommandRegistry) -> String {
    let width = registry
        .entries()
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    let mut text = format!("Usage: {}\n\n{}\n\nCommands:\n", USAGE, DESCRIPTION);
    for entry in registry.entries() {
        text.push_str(&format!(
            "  {:width$}  {}\n",
            entry.name,
            entry.description,
            width = width
        ));
    }
    text.push_str("\nRun 'gol <command> --help' for the options of a command.\n");
    text
}

/// Print version or help; no arguments and `--help` print the same help
pub fn run(argv: &[String], registry: &CommandRegistry) -> CliResult<()> {
    let Some(args) = parse_args::<DefaultArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let mut stdout = io::stdout().lock();
    if args.version {
        writeln!(stdout, "{}", version_text())?;
    } else {
        write!(stdout, "{}", help_text(registry))?;
    }
    stdout.flush()?;
    Ok(())
}
