//! Features stored in a Geo-Object Library.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::geo::{Bounds, Coordinate};

/// OSM-style feature type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureType {
    Node,
    Way,
    Relation,
}

impl FeatureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::Node => "node",
            FeatureType::Way => "way",
            FeatureType::Relation => "relation",
        }
    }

    /// Single-letter prefix used in compact ids (`N123`)
    pub fn letter(&self) -> char {
        match self {
            FeatureType::Node => 'N',
            FeatureType::Way => 'W',
            FeatureType::Relation => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(FeatureType::Node),
            'W' => Some(FeatureType::Way),
            'R' => Some(FeatureType::Relation),
            _ => None,
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "node" => Some(FeatureType::Node),
            "way" => Some(FeatureType::Way),
            "relation" => Some(FeatureType::Relation),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of feature categories a query accepts
///
/// Areas are ways or relations with polygon geometry; they form their
/// own category as in GOQL (`n`, `w`, `a`, `r`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeMask(u8);

impl TypeMask {
    pub const NONE: TypeMask = TypeMask(0);
    pub const NODES: TypeMask = TypeMask(1);
    pub const WAYS: TypeMask = TypeMask(2);
    pub const AREAS: TypeMask = TypeMask(4);
    pub const RELATIONS: TypeMask = TypeMask(8);
    pub const ALL: TypeMask = TypeMask(15);

    /// Whether the two sets share a category
    pub fn accepts(self, other: TypeMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TypeMask {
    type Output = TypeMask;

    fn bitor(self, rhs: TypeMask) -> TypeMask {
        TypeMask(self.0 | rhs.0)
    }
}

/// Feature geometry, serialized as `{"point": ...}`, `{"line": ...}` or
/// `{"polygon": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Geometry {
    Point(Coordinate),
    Line(Vec<Coordinate>),
    /// Outer ring, open or closed
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    pub fn vertices(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(c) => std::slice::from_ref(c),
            Geometry::Line(points) | Geometry::Polygon(points) => points,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(self.vertices())
    }

    /// Mean of the distinct vertices
    pub fn centroid(&self) -> Option<Coordinate> {
        let mut points = self.vertices();
        if let Geometry::Polygon(ring) = self {
            if ring.len() > 1 && ring.first() == ring.last() {
                points = &ring[..ring.len() - 1];
            }
        }
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lon, lat) = points
            .iter()
            .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));
        Some(Coordinate::new(lon / n, lat / n))
    }

    /// Problems that make the geometry unusable, if any
    pub fn validate(&self) -> Result<(), String> {
        let min_points = match self {
            Geometry::Point(_) => 1,
            Geometry::Line(_) => 2,
            Geometry::Polygon(_) => 3,
        };
        let points = self.vertices();
        if points.len() < min_points {
            return Err(format!(
                "needs at least {} points, has {}",
                min_points,
                points.len()
            ));
        }
        if let Some(bad) = points.iter().find(|c| !c.is_valid()) {
            return Err(format!("coordinate out of range: {},{}", bad.lon, bad.lat));
        }
        Ok(())
    }
}

/// A feature: typed id, tags and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: u64,
    #[serde(rename = "type")]
    pub feature_type: FeatureType,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    pub geometry: Geometry,
}

impl Feature {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.tag("name")
    }

    pub fn is_area(&self) -> bool {
        self.feature_type != FeatureType::Node && matches!(self.geometry, Geometry::Polygon(_))
    }

    /// The single category this feature belongs to
    pub fn type_mask(&self) -> TypeMask {
        match self.feature_type {
            FeatureType::Node => TypeMask::NODES,
            _ if self.is_area() => TypeMask::AREAS,
            FeatureType::Way => TypeMask::WAYS,
            FeatureType::Relation => TypeMask::RELATIONS,
        }
    }

    /// `node/123`
    pub fn display_id(&self) -> String {
        format!("{}/{}", self.feature_type, self.id)
    }

    /// `N123`
    pub fn short_id(&self) -> String {
        format!("{}{}", self.feature_type.letter(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_json_layout() {
        let json = r#"{"id":5,"type":"way","tags":{"building":"yes"},
            "geometry":{"polygon":[[0,0],[1,0],[1,1],[0,0]]}}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.feature_type, FeatureType::Way);
        assert!(feature.is_area());
        assert_eq!(feature.type_mask(), TypeMask::AREAS);
        assert_eq!(feature.short_id(), "W5");
        assert_eq!(feature.display_id(), "way/5");
    }

    #[test]
    fn test_tags_default_to_empty() {
        let json = r#"{"id":1,"type":"node","geometry":{"point":[1,2]}}"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert!(feature.tags.is_empty());
        assert_eq!(feature.type_mask(), TypeMask::NODES);
    }

    #[test]
    fn test_centroid_ignores_closing_vertex() {
        let g = Geometry::Polygon(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(2.0, 0.0),
            Coordinate::new(2.0, 2.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(0.0, 0.0),
        ]);
        assert_eq!(g.centroid(), Some(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_validate_geometry() {
        assert!(Geometry::Line(vec![Coordinate::new(0.0, 0.0)]).validate().is_err());
        assert!(Geometry::Point(Coordinate::new(0.0, 95.0)).validate().is_err());
        assert!(Geometry::Point(Coordinate::new(0.0, 45.0)).validate().is_ok());
    }

    #[test]
    fn test_type_mask_accepts() {
        let mask = TypeMask::NODES | TypeMask::AREAS;
        assert!(mask.accepts(TypeMask::AREAS));
        assert!(!mask.accepts(TypeMask::WAYS));
        assert!(TypeMask::NONE.is_empty());
    }

    #[test]
    fn test_type_letters() {
        assert_eq!(FeatureType::from_letter('w'), Some(FeatureType::Way));
        assert_eq!(FeatureType::from_letter('x'), None);
        assert_eq!(FeatureType::from_name("relation"), Some(FeatureType::Relation));
    }
}
