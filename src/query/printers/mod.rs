//! # Query Printers
//!
//! One printer per output format. A printer runs a [`QuerySpec`] and
//! writes the serialized results to the sink it is given; it never
//! writes anywhere else.

mod brief;
mod count;
mod csv;
mod geojson;
mod list;
mod wkt;
mod xml;

pub use brief::BriefPrinter;
pub use count::CountPrinter;
pub use csv::CsvPrinter;
pub use geojson::{feature_json, GeoJsonPrinter};
pub use list::ListPrinter;
pub use wkt::WktPrinter;
pub use xml::XmlPrinter;

use std::io::Write;

use crate::error::GolResult;
use crate::store::Feature;

use super::spec::QuerySpec;

/// An output-format strategy
pub trait QueryPrinter {
    /// Run the query and write every result to `out`
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()>;
}

/// Keys that name feature attributes rather than tags
const PSEUDO_KEYS: [&str; 4] = ["id", "lon", "lat", "tags"];

/// Format a coordinate component with at most `precision` decimals
pub(crate) fn format_coord(value: f64, precision: usize) -> String {
    let s = format!("{:.*}", precision, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    match s {
        "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// Round a coordinate component to `precision` decimals
pub(crate) fn round_coord(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}

/// Tags of `feature` selected by a key list
///
/// An empty key list selects every tag. Otherwise the named tag keys are
/// selected, plus every remaining tag when the list contains `tags`.
pub(crate) fn project_tags<'f>(feature: &'f Feature, keys: &[&str]) -> Vec<(&'f str, &'f str)> {
    let all = || feature.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    if keys.is_empty() {
        return all().collect();
    }
    let mut tags: Vec<(&str, &str)> = keys
        .iter()
        .filter(|k| !PSEUDO_KEYS.contains(*k))
        .filter_map(|k| feature.tags.get_key_value(*k))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if keys.contains(&"tags") {
        tags.extend(all().filter(|(k, _)| !keys.contains(k)));
    }
    tags
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coord_trims_zeros() {
        assert_eq!(format_coord(13.4, 7), "13.4");
        assert_eq!(format_coord(1.0, 7), "1");
        assert_eq!(format_coord(-0.00000001, 7), "0");
        assert_eq!(format_coord(1.123456789, 3), "1.123");
        assert_eq!(format_coord(5.0, 0), "5");
    }

    #[test]
    fn test_round_coord() {
        assert_eq!(round_coord(1.123456789, 2), 1.12);
    }

    #[test]
    fn test_project_tags() {
        let store = test_support::library();
        let cafe = &store.features()[0];
        assert_eq!(project_tags(cafe, &[]).len(), 2);
        assert_eq!(project_tags(cafe, &["name"]), vec![("name", "Blue, Bottle")]);
        assert_eq!(
            project_tags(cafe, &["name", "tags"]),
            vec![("name", "Blue, Bottle"), ("amenity", "cafe")]
        );
        assert!(project_tags(cafe, &["id", "lon"]).is_empty());
    }
}
