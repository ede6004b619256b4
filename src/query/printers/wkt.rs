//! `wkt`: a single GEOMETRYCOLLECTION of all results.

use std::io::Write;

use crate::error::GolResult;
use crate::geo::Coordinate;
use crate::query::QuerySpec;
use crate::store::Geometry;

use super::{format_coord, QueryPrinter};

pub struct WktPrinter;

impl QueryPrinter for WktPrinter {
    fn run(&self, spec: &QuerySpec<'_>, out: &mut dyn Write) -> GolResult<()> {
        let precision = spec.precision();
        let mut first = true;
        spec.for_each(|feature| {
            write!(out, "{}", if first { "GEOMETRYCOLLECTION(" } else { "," })?;
            first = false;
            write!(out, "{}", geometry_wkt(&feature.geometry, precision))?;
            Ok(())
        })?;
        if first {
            writeln!(out, "GEOMETRYCOLLECTION EMPTY")?;
        } else {
            writeln!(out, ")")?;
        }
        Ok(())
    }
}

fn geometry_wkt(geometry: &Geometry, precision: usize) -> String {
    let coords = |points: &[Coordinate]| {
        points
            .iter()
            .map(|c| {
                format!(
                    "{} {}",
                    format_coord(c.lon, precision),
                    format_coord(c.lat, precision)
                )
            })
            .collect::<Vec<_>>()
            .join(",")
    };
    match geometry {
        Geometry::Point(c) => format!("POINT({})", coords(std::slice::from_ref(c))),
        Geometry::Line(points) => format!("LINESTRING({})", coords(points.as_slice())),
        Geometry::Polygon(ring) => {
            let mut closed = ring.clone();
            if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                if first != last {
                    closed.push(*first);
                }
            }
            format!("POLYGON(({}))", coords(closed.as_slice()))
        }
    }
}
