//! Text notations for bounding boxes and polygons.
//!
//! Boxes are `west,south,east,north`. Polygons are accepted in three
//! notations:
//! - a flat coordinate list: `x1,y1,x2,y2,x3,y3,...`
//! - WKT: `POLYGON((x1 y1, x2 y2, ...))`
//! - a GeoJSON `Polygon` geometry, or a `Feature` wrapping one

use serde_json::Value;

use crate::error::{GolError, GolResult};

use super::bounds::{Bounds, Coordinate};
use super::polygon::PolygonFilter;

/// Parse `west,south,east,north`
pub fn parse_box(s: &str) -> GolResult<Bounds> {
    let numbers = parse_numbers(s).map_err(GolError::InvalidBox)?;
    let [west, south, east, north] = numbers[..] else {
        return Err(GolError::InvalidBox(format!(
            "Expected 4 numbers (west,south,east,north), got {}",
            numbers.len()
        )));
    };
    let bounds = Bounds::new(west, south, east, north);
    if !Coordinate::new(west, south).is_valid() || !Coordinate::new(east, north).is_valid() {
        return Err(GolError::InvalidBox(format!("Out of range: {}", bounds)));
    }
    if west > east || south > north {
        return Err(GolError::InvalidBox(format!(
            "West/south must not exceed east/north: {}",
            bounds
        )));
    }
    Ok(bounds)
}

/// Parse a polygon in any supported notation
pub fn parse_polygon(s: &str) -> GolResult<PolygonFilter> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        return parse_geojson(trimmed);
    }
    if trimmed
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("POLYGON"))
    {
        return parse_wkt(&trimmed[7..]);
    }
    let numbers = parse_numbers(trimmed).map_err(GolError::InvalidPolygon)?;
    if numbers.len() % 2 != 0 {
        return Err(GolError::InvalidPolygon(
            "Coordinate list must contain an even number of values".to_string(),
        ));
    }
    let ring = numbers
        .chunks_exact(2)
        .map(|pair| Coordinate::new(pair[0], pair[1]))
        .collect();
    PolygonFilter::new(ring)
}

/// Numbers separated by commas and/or whitespace
fn parse_numbers(s: &str) -> Result<Vec<f64>, String> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("Not a number: '{}'", token))
        })
        .collect()
}

fn parse_wkt(body: &str) -> GolResult<PolygonFilter> {
    let body = body.trim();
    let inner = body
        .strip_prefix('(')
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .ok_or_else(|| GolError::InvalidPolygon("Expected '((' after POLYGON".to_string()))?;
    // Holes are ignored; only the outer ring restricts the query
    let outer = inner
        .split(')')
        .next()
        .filter(|_| inner.contains(')'))
        .ok_or_else(|| GolError::InvalidPolygon("Unterminated ring".to_string()))?;

    let ring = outer
        .split(',')
        .map(|point| {
            let numbers = parse_numbers(point).map_err(GolError::InvalidPolygon)?;
            match numbers[..] {
                [lon, lat] => Ok(Coordinate::new(lon, lat)),
                _ => Err(GolError::InvalidPolygon(format!(
                    "Expected 'x y', got '{}'",
                    point.trim()
                ))),
            }
        })
        .collect::<GolResult<Vec<_>>>()?;
    PolygonFilter::new(ring)
}

fn parse_geojson(s: &str) -> GolResult<PolygonFilter> {
    let value: Value = serde_json::from_str(s)
        .map_err(|e| GolError::InvalidPolygon(format!("Invalid GeoJSON: {}", e)))?;
    let geometry = match value.get("type").and_then(Value::as_str) {
        Some("Feature") => value.get("geometry").unwrap_or(&Value::Null),
        _ => &value,
    };
    if geometry.get("type").and_then(Value::as_str) != Some("Polygon") {
        return Err(GolError::InvalidPolygon(
            "GeoJSON geometry must be a Polygon".to_string(),
        ));
    }
    let ring: Vec<[f64; 2]> = geometry
        .get("coordinates")
        .and_then(|rings| rings.get(0))
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| GolError::InvalidPolygon(format!("Invalid coordinates: {}", e)))?
        .ok_or_else(|| GolError::InvalidPolygon("Polygon has no rings".to_string()))?;
    PolygonFilter::new(ring.into_iter().map(Coordinate::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Filter;

    #[test]
    fn test_parse_box() {
        let b = parse_box("-0.5, 51.2,0.3,51.7").unwrap();
        assert_eq!(b, Bounds::new(-0.5, 51.2, 0.3, 51.7));
    }

    #[test]
    fn test_parse_box_rejects_wrong_arity() {
        assert!(matches!(parse_box("1,2,3"), Err(GolError::InvalidBox(_))));
        assert!(matches!(parse_box("1,2,3,4,5"), Err(GolError::InvalidBox(_))));
    }

    #[test]
    fn test_parse_box_rejects_garbage_and_range() {
        assert!(parse_box("a,b,c,d").is_err());
        assert!(parse_box("0,0,200,10").is_err());
        assert!(parse_box("10,0,0,10").is_err());
    }

    #[test]
    fn test_parse_flat_polygon() {
        let p = parse_polygon("10,10,20,10,20,20,10,20").unwrap();
        assert_eq!(p.bounds(), Bounds::new(10.0, 10.0, 20.0, 20.0));
    }

    #[test]
    fn test_parse_flat_polygon_odd_count() {
        assert!(parse_polygon("10,10,20,10,20").is_err());
    }

    #[test]
    fn test_parse_wkt_polygon() {
        let p = parse_polygon("POLYGON((10 10, 20 10, 20 20, 10 20, 10 10))").unwrap();
        assert_eq!(p.ring().len(), 4);
        assert_eq!(p.bounds(), Bounds::new(10.0, 10.0, 20.0, 20.0));

        let lower = parse_polygon("polygon ((0 0, 1 0, 1 1))").unwrap();
        assert_eq!(lower.ring().len(), 3);
    }

    #[test]
    fn test_parse_wkt_unterminated() {
        assert!(parse_polygon("POLYGON((0 0, 1 0, 1 1").is_err());
    }

    #[test]
    fn test_parse_geojson_polygon() {
        let json = r#"{"type":"Polygon","coordinates":[[[10,10],[20,10],[20,20],[10,20],[10,10]]]}"#;
        let p = parse_polygon(json).unwrap();
        assert_eq!(p.bounds(), Bounds::new(10.0, 10.0, 20.0, 20.0));

        let feature = format!(r#"{{"type":"Feature","properties":{{}},"geometry":{}}}"#, json);
        assert!(parse_polygon(&feature).is_ok());
    }

    #[test]
    fn test_parse_geojson_wrong_type() {
        let json = r#"{"type":"Point","coordinates":[1,2]}"#;
        assert!(matches!(parse_polygon(json), Err(GolError::InvalidPolygon(_))));
    }
}
