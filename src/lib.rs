//! gol - Build, manage and query Geo-Object Libraries
//!
//! The crate is organised leaves first:
//! - `geo`: bounds, polygon filters and the text parsers for both
//! - `store`: the read-only Geo-Object Library and its features
//! - `query`: GOQL matchers, query specs and the output-format printers
//! - `http_server`: the query gateway served by `gol server`
//! - `cli`: the command registry and the subcommands

pub mod cli;
pub mod error;
pub mod geo;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod store;

pub use error::{ErrorKind, GolError, GolResult};
