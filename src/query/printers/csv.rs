//! `csv`: one row per feature, columns from the key list.
//!
//! `id` is the compact id (`N123`), `lon`/`lat` the centroid, `tags` all
//! tags not given a column of their own as `k=v;k=v`. Any other key is a
//! tag column. Fields are quoted per RFC 4180 when needed.

use std::io::Write;

use crate::error::GolResult;
use crate::query::{QuerySpec, CSV_KEYS};

use super::{format_coord, QueryPrinter};

pub struct CsvPrinter;

impl QueryPrinter for CsvPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let mut keys = spec.key_list();
        if keys.is_empty() {
            keys = CSV_KEYS.split(',').collect();
        }
        writeln!(out, "{}", join_row(keys.iter().map(|k| k.to_string())))?;

        spec.for_each(|feature| {
            let centroid = feature.geometry.centroid();
            let row = keys.iter().map(|key| match *key {
                "id" => feature.short_id(),
                "lon" => centroid
                    .map(|c| format_coord(c.lon, spec.precision()))
                    .unwrap_or_default(),
                "lat" => centroid
                    .map(|c| format_coord(c.lat, spec.precision()))
                    .unwrap_or_default(),
                "tags" => feature
                    .tags
                    .iter()
                    .filter(|(k, _)| !keys.contains(&k.as_str()))
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(";"),
                tag => feature.tag(tag).unwrap_or_default().to_string(),
            });
            writeln!(out, "{}", join_row(row))?;
            Ok(())
        })
    }
}

fn join_row(fields: impl Iterator<Item = String>) -> String {
    fields.map(|f| quote(&f)).collect::<Vec<_>>().join(",")
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::printers::test_support::render;

    #[test]
    fn test_csv_default_columns() {
        let out = render(&CsvPrinter, "n", CSV_KEYS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id,lon,lat,tags");
        assert_eq!(lines[1], "N1,13.4,52.52,\"amenity=cafe;name=Blue, Bottle\"");
    }

    #[test]
    fn test_csv_tag_columns() {
        let out = render(&CsvPrinter, "w", "id,highway");
        assert_eq!(out, "id,highway\nW20,residential\n");
    }

    #[test]
    fn test_csv_centroid_of_area() {
        let out = render(&CsvPrinter, "a", "id,lon,lat");
        assert_eq!(out.lines().nth(1), Some("W300,1.3333333,0.6666667"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "plain");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
