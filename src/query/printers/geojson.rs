//! `geojson` / `geojsonl`: a FeatureCollection, or one Feature per line.

use std::io::Write;

use serde_json::{json, Map, Value};

use crate::error::GolResult;
use crate::geo::Coordinate;
use crate::query::QuerySpec;
use crate::store::{Feature, Geometry};

use super::{project_tags, round_coord, QueryPrinter};

pub struct GeoJsonPrinter {
    linewise: bool,
}

impl GeoJsonPrinter {
    /// A single FeatureCollection document
    pub fn collection() -> Self {
        Self { linewise: false }
    }

    /// Newline-delimited Features
    pub fn lines() -> Self {
        Self { linewise: true }
    }
}

impl QueryPrinter for GeoJsonPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let keys = spec.key_list();
        if self.linewise {
            return spec.for_each(|feature| {
                let value = feature_json(feature, spec.precision(), &keys);
                writeln!(out, "{}", value)?;
                Ok(())
            });
        }

        write!(out, "{{\"type\":\"FeatureCollection\",\"features\":[")?;
        let mut first = true;
        spec.for_each(|feature| {
            if !first {
                write!(out, ",")?;
            }
            first = false;
            write!(out, "{}", feature_json(feature, spec.precision(), &keys))?;
            Ok(())
        })?;
        writeln!(out, "]}}")?;
        Ok(())
    }
}

/// A feature as a GeoJSON Feature object
pub fn feature_json(feature: &Feature, precision: usize, keys: &[&str]) -> Value {
    let point = |c: &Coordinate| {
        json!([round_coord(c.lon, precision), round_coord(c.lat, precision)])
    };
    let geometry = match &feature.geometry {
        Geometry::Point(c) => json!({"type": "Point", "coordinates": point(c)}),
        Geometry::Line(points) => json!({
            "type": "LineString",
            "coordinates": points.iter().map(point).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(ring) => {
            let mut coords: Vec<Value> = ring.iter().map(point).collect();
            if ring.first() != ring.last() {
                coords.extend(ring.first().map(point));
            }
            json!({"type": "Polygon", "coordinates": [coords]})
        }
    };

    let properties: Map<String, Value> = project_tags(feature, keys)
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();

    json!({
        "type": "Feature",
        "id": feature.short_id(),
        "geometry": geometry,
        "properties": properties,
    })
}
