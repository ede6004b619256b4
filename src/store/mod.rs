//! # Geo-Object Library
//!
//! The read-only feature store queried by the CLI and the gateway.
//!
//! A library file is a JSON document:
//!
//! ```json
//! {"features": [
//!   {"id": 1, "type": "node", "tags": {"amenity": "cafe"}, "geometry": {"point": [13.4, 52.5]}}
//! ]}
//! ```
//!
//! The store is never mutated after it is opened. The only interior state
//! is the cache of compiled matchers, keyed by query string. The cache
//! holds at most [`MATCHER_CACHE_CAPACITY`] entries; once full, further
//! queries are compiled per call and not retained.

mod feature;

pub use feature::{Feature, FeatureType, Geometry, TypeMask};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;

use crate::error::{GolError, GolResult};
use crate::geo::Bounds;
use crate::query::Matcher;

/// Most compiled matchers a store keeps
pub const MATCHER_CACHE_CAPACITY: usize = 1000;

/// Read access to a set of features, as consumed by the query pipeline
pub trait FeatureSource: Send + Sync {
    /// Compile (or fetch a cached) matcher for a GOQL expression
    fn matcher(&self, query: &str) -> GolResult<Arc<Matcher>>;

    /// Visit every feature whose extent intersects `bounds`
    fn scan(
        &self,
        bounds: &Bounds,
        visit: &mut dyn FnMut(&Feature) -> GolResult<()>,
    ) -> GolResult<()>;
}

#[derive(Deserialize)]
struct LibraryFile {
    features: Vec<Feature>,
}

/// An in-memory Geo-Object Library
pub struct Store {
    path: Option<PathBuf>,
    features: Vec<Feature>,
    extents: Vec<Option<Bounds>>,
    by_id: HashMap<(FeatureType, u64), usize>,
    matchers: Mutex<HashMap<String, Arc<Matcher>>>,
}

impl Store {
    /// Open a library file
    pub fn open(path: &Path) -> GolResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GolError::InvalidLibrary(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let library: LibraryFile = serde_json::from_str(&content).map_err(|e| {
            GolError::InvalidLibrary(format!("{} is not a library: {}", path.display(), e))
        })?;

        let mut store = Self::from_features(library.features);
        store.path = Some(path.to_path_buf());
        Ok(store)
    }

    /// Build a library from features held in memory
    ///
    /// Duplicate ids are kept; lookups by id resolve to the first one.
    pub fn from_features(features: Vec<Feature>) -> Self {
        let extents = features.iter().map(|f| f.geometry.bounds()).collect();
        let mut by_id = HashMap::with_capacity(features.len());
        for (index, feature) in features.iter().enumerate() {
            by_id
                .entry((feature.feature_type, feature.id))
                .or_insert(index);
        }
        Self {
            path: None,
            features,
            extents,
            by_id,
            matchers: Mutex::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, feature_type: FeatureType, id: u64) -> Option<&Feature> {
        self.by_id
            .get(&(feature_type, id))
            .map(|&index| &self.features[index])
    }

    /// Extent of all features
    pub fn bounds(&self) -> Option<Bounds> {
        self.extents
            .iter()
            .flatten()
            .copied()
            .reduce(|a, b| a.union(&b))
    }

    /// Integrity problems: duplicate ids and malformed geometries
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::with_capacity(self.features.len());
        for feature in &self.features {
            if !seen.insert((feature.feature_type, feature.id)) {
                problems.push(format!("{}: duplicate id", feature.display_id()));
            }
            if let Err(reason) = feature.geometry.validate() {
                problems.push(format!("{}: {}", feature.display_id(), reason));
            }
        }
        problems
    }
}

impl FeatureSource for Store {
    fn matcher(&self, query: &str) -> GolResult<Arc<Matcher>> {
        let mut cache = self.matchers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(matcher) = cache.get(query) {
            return Ok(Arc::clone(matcher));
        }
        let matcher = Arc::new(Matcher::compile(query)?);
        if cache.len() < MATCHER_CACHE_CAPACITY {
            cache.insert(query.to_string(), Arc::clone(&matcher));
        }
        Ok(matcher)
    }

    fn scan(
        &self,
        bounds: &Bounds,
        visit: &mut dyn FnMut(&Feature) -> GolResult<()>,
    ) -> GolResult<()> {
        for (feature, extent) in self.features.iter().zip(&self.extents) {
            if extent.is_some_and(|e| e.intersects(bounds)) {
                visit(feature)?;
            }
        }
        Ok(())
    }
}
