//! Query string parameters of the gateway endpoint.

use crate::query::OutputFormat;

/// The four optional parameters of `GET /`
///
/// Missing parameters are empty strings. A repeated parameter keeps its
/// first value; unrecognised parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// GOQL expression; empty matches everything
    pub query: String,

    /// Output format name; empty means GeoJSON
    pub format: String,

    /// `west,south,east,north`
    pub bbox: String,

    /// Polygon restricting the results
    pub area: String,
}

impl QueryParams {
    /// Collect decoded `key=value` pairs in query-string order
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        let mut seen = [false; 4];
        for (key, value) in pairs {
            let (slot, field) = match key.as_str() {
                "query" => (0, &mut params.query),
                "format" => (1, &mut params.format),
                "bbox" => (2, &mut params.bbox),
                "area" => (3, &mut params.area),
                _ => continue,
            };
            if !seen[slot] {
                seen[slot] = true;
                *field = value;
            }
        }
        params
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_param(&self.format)
    }
}
