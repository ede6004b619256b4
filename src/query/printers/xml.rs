//! `xml`: an OSM-style document.
//!
//! Nodes carry `lat`/`lon` attributes; ways and relations carry a
//! `<center>` child, as Overpass does for `out center`.

use std::io::Write;

use crate::error::GolResult;
use crate::query::QuerySpec;
use crate::store::FeatureType;

use super::{format_coord, project_tags, QueryPrinter};

pub struct XmlPrinter;

impl QueryPrinter for XmlPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let precision = spec.precision();
        let keys = spec.key_list();
        writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(out, "<osm version=\"0.6\" generator=\"gol\">")?;
        spec.for_each(|feature| {
            let element = feature.feature_type.as_str();
            let centroid = feature.geometry.centroid();
            let tags = project_tags(feature, &keys);

            write!(out, "  <{} id=\"{}\"", element, feature.id)?;
            if let (FeatureType::Node, Some(c)) = (feature.feature_type, centroid) {
                write!(
                    out,
                    " lat=\"{}\" lon=\"{}\"",
                    format_coord(c.lat, precision),
                    format_coord(c.lon, precision)
                )?;
            }
            let has_center = feature.feature_type != FeatureType::Node && centroid.is_some();
            if tags.is_empty() && !has_center {
                writeln!(out, "/>")?;
                return Ok(());
            }
            writeln!(out, ">")?;
            if let Some(c) = centroid.filter(|_| has_center) {
                writeln!(
                    out,
                    "    <center lat=\"{}\" lon=\"{}\"/>",
                    format_coord(c.lat, precision),
                    format_coord(c.lon, precision)
                )?;
            }
            for (k, v) in tags {
                writeln!(out, "    <tag k=\"{}\" v=\"{}\"/>", escape(k), escape(v))?;
            }
            writeln!(out, "  </{}>", element)?;
            Ok(())
        })?;
        writeln!(out, "</osm>")?;
        Ok(())
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::printers::test_support::render;

    #[test]
    fn test_xml_document() {
        let out = render(&XmlPrinter, "", "");
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<osm"));
        assert!(out.contains("  <node id=\"1\" lat=\"52.52\" lon=\"13.4\">\n"));
        assert!(out.contains("    <tag k=\"amenity\" v=\"cafe\"/>\n"));
        assert!(out.contains("  <way id=\"20\">\n    <center lat=\"52.25\" lon=\"13.25\"/>\n"));
        assert!(out.ends_with("</osm>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
