//! Coordinates and axis-aligned bounding boxes (WGS84 degrees).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair, serialized as `[lon, lat]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are finite and inside the world bounds
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite() && Bounds::world().contains(*self)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

/// An axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// The whole world; the default extent of every query
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    /// Smallest box containing all the given coordinates
    pub fn of_points<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.lon, first.lat, first.lon, first.lat);
        for c in iter {
            bounds.expand(*c);
        }
        Some(bounds)
    }

    pub fn expand(&mut self, c: Coordinate) {
        self.west = self.west.min(c.lon);
        self.south = self.south.min(c.lat);
        self.east = self.east.max(c.lon);
        self.north = self.north.max(c.lat);
    }

    /// Merge another box into this one
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::new(
            self.west.min(other.west),
            self.south.min(other.south),
            self.east.max(other.east),
            self.north.max(other.north),
        )
    }

    pub fn is_world(&self) -> bool {
        *self == Self::world()
    }

    /// Edges are inclusive
    pub fn contains(&self, c: Coordinate) -> bool {
        c.lon >= self.west && c.lon <= self.east && c.lat >= self.south && c.lat <= self.north
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.west <= other.east
            && other.west <= self.east
            && self.south <= other.north
            && other.south <= self.north
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::world()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}
