//! The query specification handed to a printer.

use std::sync::Arc;

use crate::error::GolResult;
use crate::geo::{Bounds, Filter};
use crate::store::{Feature, FeatureSource, TypeMask};

use super::matcher::Matcher;

/// Digits after the decimal point in coordinate output
pub const DEFAULT_PRECISION: usize = 7;

/// Column set of CSV output produced by the gateway
pub const CSV_KEYS: &str = "id,lon,lat,tags";

/// Everything one printer needs to run one query
///
/// Constructed once per query and consumed by exactly one printer.
pub struct QuerySpec<'a> {
    store: &'a dyn FeatureSource,
    bounds: Bounds,
    types: TypeMask,
    matcher: Arc<Matcher>,
    filter: Option<&'a dyn Filter>,
    precision: usize,
    keys: String,
}

impl<'a> QuerySpec<'a> {
    pub fn new(
        store: &'a dyn FeatureSource,
        bounds: Bounds,
        matcher: Arc<Matcher>,
        filter: Option<&'a dyn Filter>,
        precision: usize,
        keys: impl Into<String>,
    ) -> Self {
        Self {
            store,
            bounds,
            types: matcher.accepted_types(),
            matcher,
            filter,
            precision,
            keys: keys.into(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn types(&self) -> TypeMask {
        self.types
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// The raw comma-separated key list
    pub fn keys(&self) -> &str {
        &self.keys
    }

    /// The key list split into names; empty means "all tags"
    pub fn key_list(&self) -> Vec<&str> {
        self.keys
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Visit every feature that satisfies bounds, types, matcher and filter
    pub fn for_each(&self, mut visit: impl FnMut(&Feature) -> GolResult<()>) -> GolResult<()> {
        self.store.scan(&self.bounds, &mut |feature| {
            if self.types.accepts(feature.type_mask())
                && self.matcher.matches(feature)
                && self.filter.map_or(true, |f| f.accept(feature))
            {
                visit(feature)
            } else {
                Ok(())
            }
        })
    }
}
