//! Spatial restriction of a query from `bbox` and `area` text.

use crate::error::GolResult;
use crate::geo::{parse_box, parse_polygon, Bounds, Filter, PolygonFilter};

/// Bounds plus an optional polygon filter
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialFilter {
    pub bounds: Bounds,
    pub polygon: Option<PolygonFilter>,
}

impl SpatialFilter {
    /// The polygon as a borrowed filter for a `QuerySpec`
    pub fn filter(&self) -> Option<&dyn Filter> {
        self.polygon.as_ref().map(|p| p as &dyn Filter)
    }
}

/// Build bounds and filter; empty strings mean "not given"
///
/// Bounds default to the whole world. A polygon's bounds override the
/// bbox when both are given.
pub fn build_spatial_filter(bbox: &str, area: &str) -> GolResult<SpatialFilter> {
    let mut bounds = Bounds::world();
    let mut polygon = None;

    if !bbox.is_empty() {
        bounds = parse_box(bbox)?;
    }
    if !area.is_empty() {
        let filter = parse_polygon(area)?;
        bounds = filter.bounds();
        polygon = Some(filter);
    }
    Ok(SpatialFilter { bounds, polygon })
}
