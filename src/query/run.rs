//! One query from request text to formatted output.

use std::io::Write;

use crate::error::GolResult;
use crate::store::FeatureSource;

use super::dispatch::dispatch;
use super::format::OutputFormat;
use super::spatial::build_spatial_filter;
use super::spec::{QuerySpec, DEFAULT_PRECISION};

/// Textual inputs of a query, as given on the command line or in a URL
#[derive(Debug, Clone, Copy)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub bbox: &'a str,
    pub area: &'a str,
    pub keys: &'a str,
    pub precision: usize,
}

impl Default for QueryRequest<'_> {
    fn default() -> Self {
        Self {
            query: "",
            bbox: "",
            area: "",
            keys: "",
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Build filter and matcher, then run exactly one printer into `out`
pub fn run_query(
    source: &dyn FeatureSource,
    format: OutputFormat,
    request: &QueryRequest<'_>,
    out: &mut dyn Write,
) -> GolResult<()> {
    let spatial = build_spatial_filter(request.bbox, request.area)?;
    let matcher = source.matcher(request.query)?;
    let spec = QuerySpec::new(
        source,
        spatial.bounds,
        matcher,
        spatial.filter(),
        request.precision,
        request.keys,
    );
    dispatch(format, &spec, out)?;
    out.flush()?;
    Ok(())
}
