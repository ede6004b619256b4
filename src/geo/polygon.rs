//! Polygon containment filter.

use crate::error::{GolError, GolResult};
use crate::store::{Feature, Geometry};

use super::bounds::{Bounds, Coordinate};
use super::Filter;

/// A single-ring polygon
///
/// The ring is stored open (first vertex not repeated at the end).
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFilter {
    ring: Vec<Coordinate>,
    bounds: Bounds,
}

impl PolygonFilter {
    /// Build a filter from a ring, closed or open
    pub fn new(mut ring: Vec<Coordinate>) -> GolResult<Self> {
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GolError::InvalidPolygon(format!(
                "A polygon needs at least 3 distinct points, got {}",
                ring.len()
            )));
        }
        if let Some(bad) = ring.iter().find(|c| !c.is_valid()) {
            return Err(GolError::InvalidPolygon(format!(
                "Coordinate out of range: {},{}",
                bad.lon, bad.lat
            )));
        }
        let bounds = Bounds::of_points(&ring)
            .ok_or_else(|| GolError::InvalidPolygon("Empty polygon".to_string()))?;
        Ok(Self { ring, bounds })
    }

    pub fn ring(&self) -> &[Coordinate] {
        &self.ring
    }

    /// Point-in-polygon by ray casting
    pub fn contains(&self, c: Coordinate) -> bool {
        ring_contains(&self.ring, c)
    }
}

impl Filter for PolygonFilter {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn accept(&self, feature: &Feature) -> bool {
        if feature.geometry.vertices().iter().any(|c| self.contains(*c)) {
            return true;
        }
        // An area feature that swallows the filter polygon whole
        match &feature.geometry {
            Geometry::Polygon(ring) => ring_contains(ring, self.ring[0]),
            _ => false,
        }
    }
}

fn ring_contains(ring: &[Coordinate], c: Coordinate) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.lat > c.lat) != (b.lat > c.lat)
            && c.lon < (b.lon - a.lon) * (c.lat - a.lat) / (b.lat - a.lat) + a.lon
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
