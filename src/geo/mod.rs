//! # Geometry
//!
//! Bounding boxes, polygon filters and the text notations for both.

mod bounds;
mod parser;
mod polygon;

pub use bounds::{Bounds, Coordinate};
pub use parser::{parse_box, parse_polygon};
pub use polygon::PolygonFilter;

use crate::store::Feature;

/// A geometric predicate that restricts query results beyond the bounds
pub trait Filter: Send + Sync {
    /// Bounding box of the region the filter accepts
    fn bounds(&self) -> Bounds;

    /// Whether the feature passes the filter
    fn accept(&self, feature: &Feature) -> bool;
}
