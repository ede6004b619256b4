//! Output formats and their content types.

use std::fmt;
use std::str::FromStr;

use crate::error::GolError;

/// Output format of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    GeoJson,
    GeoJsonL,
    Brief,
    Count,
    Csv,
    List,
    Wkt,
    Xml,
    /// Sentinel for an unrecognised name; never dispatched
    Unknown,
}

impl OutputFormat {
    /// Resolve a `format` request parameter; the empty string means GeoJSON
    pub fn from_param(s: &str) -> Self {
        match s {
            "" | "json" | "geojson" => OutputFormat::GeoJson,
            "jsonl" | "geojsonl" | "ndjson" => OutputFormat::GeoJsonL,
            "brief" => OutputFormat::Brief,
            "count" => OutputFormat::Count,
            "csv" => OutputFormat::Csv,
            "list" => OutputFormat::List,
            "wkt" => OutputFormat::Wkt,
            "xml" => OutputFormat::Xml,
            _ => OutputFormat::Unknown,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == OutputFormat::Unknown
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::GeoJson | OutputFormat::GeoJsonL => "application/json",
            OutputFormat::Csv => "text/csv",
            OutputFormat::Xml => "application/xml",
            OutputFormat::Brief
            | OutputFormat::Count
            | OutputFormat::List
            | OutputFormat::Wkt
            | OutputFormat::Unknown => "text/plain",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::GeoJson => "geojson",
            OutputFormat::GeoJsonL => "geojsonl",
            OutputFormat::Brief => "brief",
            OutputFormat::Count => "count",
            OutputFormat::Csv => "csv",
            OutputFormat::List => "list",
            OutputFormat::Wkt => "wkt",
            OutputFormat::Xml => "xml",
            OutputFormat::Unknown => "unknown",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GolError;

    /// Strict parse for command-line use: unknown and empty names fail
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OutputFormat::from_param(s) {
            OutputFormat::Unknown => Err(GolError::InvalidFormat(s.to_string())),
            _ if s.is_empty() => Err(GolError::InvalidFormat(s.to_string())),
            format => Ok(format),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognised_names_resolve() {
        let names = [
            "", "json", "geojson", "jsonl", "geojsonl", "ndjson", "brief", "count", "csv", "list",
            "wkt", "xml",
        ];
        for name in names {
            assert!(!OutputFormat::from_param(name).is_unknown(), "{}", name);
        }
    }

    #[test]
    fn test_empty_defaults_to_geojson() {
        assert_eq!(OutputFormat::from_param(""), OutputFormat::GeoJson);
        assert_eq!(OutputFormat::from_param("ndjson"), OutputFormat::GeoJsonL);
    }

    #[test]
    fn test_unrecognised_names_are_unknown() {
        for name in ["svg", "JSON", "geo json", "csv ", "kml"] {
            assert_eq!(OutputFormat::from_param(name), OutputFormat::Unknown, "{}", name);
        }
    }

    #[test]
    fn test_content_types() {
        assert_eq!(OutputFormat::GeoJson.content_type(), "application/json");
        assert_eq!(OutputFormat::GeoJsonL.content_type(), "application/json");
        assert_eq!(OutputFormat::Csv.content_type(), "text/csv");
        assert_eq!(OutputFormat::Xml.content_type(), "application/xml");
        for f in [OutputFormat::Brief, OutputFormat::Count, OutputFormat::List, OutputFormat::Wkt] {
            assert_eq!(f.content_type(), "text/plain");
        }
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("wkt".parse::<OutputFormat>().unwrap(), OutputFormat::Wkt);
        assert!("".parse::<OutputFormat>().is_err());
        assert!("svg".parse::<OutputFormat>().is_err());
    }
}
