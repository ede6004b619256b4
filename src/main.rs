//! gol CLI entry point
//!
//! This is a minimal entrypoint that:
//! 1. Collects the process arguments
//! 2. Hands them to the command registry (via cli::run)
//! 3. Exits with the code the registry returns
//!
//! Failure reporting and the error boundary live in the CLI module.

use gol::cli;

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    std::process::exit(cli::run(&argv));
}
