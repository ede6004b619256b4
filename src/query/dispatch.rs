//! Output format to printer table.

use std::io::Write;

use crate::error::{GolError, GolResult};

use super::format::OutputFormat;
use super::printers::{
    BriefPrinter, CountPrinter, CsvPrinter, GeoJsonPrinter, ListPrinter, QueryPrinter, WktPrinter,
    XmlPrinter,
};
use super::spec::QuerySpec;

/// The printer for a format; `None` for `Unknown`
pub fn printer_for(format: OutputFormat) -> Option<Box<dyn QueryPrinter>> {
    let printer: Box<dyn QueryPrinter> = match format {
        OutputFormat::GeoJson => Box::new(GeoJsonPrinter::collection()),
        OutputFormat::GeoJsonL => Box::new(GeoJsonPrinter::lines()),
        OutputFormat::Brief => Box::new(BriefPrinter),
        OutputFormat::Count => Box::new(CountPrinter),
        OutputFormat::Csv => Box::new(CsvPrinter),
        OutputFormat::List => Box::new(ListPrinter),
        OutputFormat::Wkt => Box::new(WktPrinter),
        OutputFormat::Xml => Box::new(XmlPrinter),
        OutputFormat::Unknown => return None,
    };
    Some(printer)
}

/// Run exactly one printer for `format` against `spec`
pub fn dispatch(format: OutputFormat, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
    let printer =
        printer_for(format).ok_or_else(|| GolError::InvalidFormat(format.to_string()))?;
    printer.run(spec, out)
}
