//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use gol::store::{FeatureSource, Store};
use tempfile::TempDir;

/// A small library: a cafe inside (10,10)-(20,20), a bench near the
/// origin and a building inside the cafe's square
pub const LIBRARY_JSON: &str = r#"{
  "features": [
    {"id": 1, "type": "node", "tags": {"amenity": "cafe", "name": "Corner"},
     "geometry": {"point": [15.0, 15.0]}},
    {"id": 2, "type": "node", "tags": {"amenity": "bench"},
     "geometry": {"point": [0.5, 0.5]}},
    {"id": 3, "type": "way", "tags": {"building": "yes"},
     "geometry": {"polygon": [[11, 11], [12, 11], [12, 12], [11, 11]]}}
  ]
}"#;

/// Polygon covering (10,10)-(20,20)
pub const SQUARE_10_20: &str = "10,10,20,10,20,20,10,20";

/// Write `json` to a library file inside a fresh temp dir
pub fn write_library(json: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("library.json");
    fs::write(&path, json).expect("Failed to write library");
    (dir, path)
}

pub fn store() -> Arc<dyn FeatureSource> {
    let (_dir, path) = write_library(LIBRARY_JSON);
    Arc::new(Store::open(&path).expect("Failed to open library"))
}
