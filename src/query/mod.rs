//! # Query Pipeline
//!
//! Everything between a GOQL string and formatted output:
//! - `matcher`: the GOQL compiler
//! - `spatial`: bounds and polygon filter from `bbox`/`area` text
//! - `spec`: the immutable bundle handed to one printer
//! - `format` and `dispatch`: output formats and the printer table
//! - `printers`: one writer per output format
//! - `run`: the whole pipeline for one query, shared by CLI and gateway

mod dispatch;
mod format;
mod matcher;
mod run;
mod spatial;
mod spec;

pub mod printers;

pub use dispatch::{dispatch, printer_for};
pub use format::OutputFormat;
pub use matcher::Matcher;
pub use run::{run_query, QueryRequest};
pub use spatial::{build_spatial_filter, SpatialFilter};
pub use spec::{QuerySpec, CSV_KEYS, DEFAULT_PRECISION};
