//! CLI command implementations
//!
//! Every handler parses its own arguments from the full argv, opens the
//! library and writes its result to stdout. Logs go to stderr.

use std::collections::BTreeSet;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use crate::error::GolError;
use crate::http_server::GolServer;
use crate::observability::{log_event_with_fields, Event};
use crate::query::printers::feature_json;
use crate::query::{run_query, OutputFormat, QueryRequest};
use crate::store::{Feature, FeatureType, Store};

use super::args::{
    parse_args, CheckArgs, DumpArgs, GetArgs, InfoArgs, QueryArgs, ServerArgs,
};
use super::errors::{CliError, CliResult};

/// Open a library file, logging the outcome
fn open_library(path: &Path) -> CliResult<Store> {
    let display = path.display().to_string();
    match Store::open(path) {
        Ok(store) => {
            log_event_with_fields(
                Event::StoreOpened,
                &[
                    ("features", store.len().to_string().as_str()),
                    ("path", display.as_str()),
                ],
            );
            Ok(store)
        }
        Err(e) => {
            log_event_with_fields(
                Event::StoreFailed,
                &[("path", display.as_str()), ("reason", e.to_string().as_str())],
            );
            Err(e.into())
        }
    }
}

/// Run `f` against a buffered stdout and flush it
fn with_stdout(f: impl FnOnce(&mut dyn Write) -> CliResult<()>) -> CliResult<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    f(&mut out)?;
    out.flush()?;
    Ok(())
}

// ==================
// query
// ==================

/// `gol query <library> [<goql>] [options]`
pub fn query(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<QueryArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let format: OutputFormat = args.format.parse()?;
    let store = open_library(&args.library)?;
    let request = QueryRequest {
        query: &args.query,
        bbox: &args.bbox,
        area: &args.area,
        keys: &args.keys,
        precision: args.precision,
    };
    with_stdout(|out| Ok(run_query(&store, format, &request, out)?))
}

// ==================
// server
// ==================

/// `gol server <library> [options]`
pub fn server(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<ServerArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let config = args.server_config()?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("host", config.host.as_str()),
            ("port", config.port.to_string().as_str()),
        ],
    );
    let store = open_library(&args.library)?;
    let server = GolServer::new(Arc::new(store), config)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(server.start())?;
    Ok(())
}

// ==================
// info
// ==================

/// `gol info <library>`
pub fn info(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<InfoArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let store = open_library(&args.library)?;
    with_stdout(|out| write_info(&store, out))
}

/// Feature counts by type, bounds and number of distinct tag keys
pub fn write_info(store: &Store, out: &mut dyn Write) -> CliResult<()> {
    let count = |t: FeatureType| {
        store
            .features()
            .iter()
            .filter(|f| f.feature_type == t)
            .count()
    };
    let areas = store.features().iter().filter(|f| f.is_area()).count();
    let tag_keys: BTreeSet<&str> = store
        .features()
        .iter()
        .flat_map(|f| f.tags.keys().map(String::as_str))
        .collect();

    if let Some(path) = store.path() {
        writeln!(out, "Library:   {}", path.display())?;
    }
    writeln!(out, "Features:  {}", store.len())?;
    writeln!(out, "  nodes:     {}", count(FeatureType::Node))?;
    writeln!(out, "  ways:      {}", count(FeatureType::Way))?;
    writeln!(out, "  relations: {}", count(FeatureType::Relation))?;
    writeln!(out, "  areas:     {}", areas)?;
    match store.bounds() {
        Some(bounds) => writeln!(out, "Bounds:    {}", bounds)?,
        None => writeln!(out, "Bounds:    (empty)")?,
    }
    writeln!(out, "Tag keys:  {}", tag_keys.len())?;
    Ok(())
}

// ==================
// check
// ==================

/// `gol check <library>`; fails when any problem is found
pub fn check(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<CheckArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let store = open_library(&args.library)?;
    let problems = store.check();
    with_stdout(|out| {
        for problem in &problems {
            writeln!(out, "{}", problem)?;
        }
        if problems.is_empty() {
            writeln!(out, "OK: {} features", store.len())?;
        }
        Ok(())
    })?;

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::check_failed(problems.len()))
    }
}

// ==================
// get
// ==================

/// `gol get <library> <id>`
pub fn get(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<GetArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let (feature_type, id) = parse_feature_id(&args.id)?;
    let store = open_library(&args.library)?;
    let feature = store
        .get(feature_type, id)
        .ok_or_else(|| GolError::FeatureNotFound(args.id.clone()))?;

    let json = feature_json(feature, args.precision, &[]);
    with_stdout(|out| {
        serde_json::to_writer_pretty(&mut *out, &json).map_err(io::Error::from)?;
        writeln!(out)?;
        Ok(())
    })
}

/// Parse `N123`, `W45`, `R6` or `node/123`
pub fn parse_feature_id(s: &str) -> Result<(FeatureType, u64), GolError> {
    let invalid = || GolError::FeatureNotFound(format!("{} is not a feature id", s));

    let (feature_type, digits) = match s.split_once('/') {
        Some((name, digits)) => (FeatureType::from_name(name), digits),
        None => {
            let mut chars = s.chars();
            let letter = chars.next().ok_or_else(invalid)?;
            (FeatureType::from_letter(letter.to_ascii_uppercase()), chars.as_str())
        }
    };
    let feature_type = feature_type.ok_or_else(invalid)?;
    let id = digits.parse::<u64>().map_err(|_| invalid())?;
    Ok((feature_type, id))
}

// ==================
// dump
// ==================

/// `gol dump <library>`
pub fn dump(argv: &[String]) -> CliResult<()> {
    let Some(args) = parse_args::<DumpArgs>(argv)? else {
        return Ok(());
    };
    args.base.apply();

    let store = open_library(&args.library)?;
    with_stdout(|out| {
        for feature in store.features() {
            write_dump_line(feature, out)?;
        }
        Ok(())
    })
}

/// One tab-separated line: id, vertex count, tags
fn write_dump_line(feature: &Feature, out: &mut dyn Write) -> io::Result<()> {
    let tags = feature
        .tags
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(";");
    writeln!(
        out,
        "{}\t{}\t{}",
        feature.short_id(),
        feature.geometry.vertices().len(),
        tags
    )
}
