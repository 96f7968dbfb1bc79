//! Object masks, object filters and query parameter assembly.
//!
//! SoftLayer projects results with an `objectMask` (`mask[id,name]`) and filters them with
//! an `objectFilter`, a JSON tree keyed by the dotted property path with an `operation` leaf.

use serde_json::{Map, Value};
use std::fmt;

/// Projection applied to a SoftLayer response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMask(String);

impl ObjectMask {
    /// Create a mask from a property list such as `id,name,subnets[cidr]`.
    ///
    /// A list already wrapped in `mask[...]` is kept as is.
    #[must_use]
    pub fn new(mask: impl Into<String>) -> Self {
        let mask = mask.into();
        let trimmed = mask.trim();
        if trimmed.starts_with("mask") {
            Self(trimmed.to_string())
        } else {
            Self(format!("mask[{trimmed}]"))
        }
    }

    /// Returns the mask in wire form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A filter on a single dotted property path.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectFilter {
    path: String,
    operation: Value,
}

impl ObjectFilter {
    /// Start a filter on `path`, e.g. `networkVlans.billingItem.orderItem.order.id`.
    #[must_use]
    pub fn path(path: impl Into<String>) -> FilterPath {
        FilterPath(path.into())
    }

    /// Renders the filter as its nested JSON tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut leaf = Map::new();
        leaf.insert("operation".to_string(), self.operation.clone());
        self.path
            .rsplit('.')
            .fold(Value::Object(leaf), |inner, segment| {
                let mut node = Map::new();
                node.insert(segment.to_string(), inner);
                Value::Object(node)
            })
    }
}

impl fmt::Display for ObjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Intermediate builder returned by [`ObjectFilter::path`].
#[derive(Debug, Clone)]
pub struct FilterPath(String);

impl FilterPath {
    /// Equality match on the path.
    #[must_use]
    pub fn eq(self, value: impl fmt::Display) -> ObjectFilter {
        ObjectFilter {
            path: self.0,
            operation: Value::String(value.to_string()),
        }
    }
}

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Attach an object mask.
    #[must_use]
    pub fn mask(mut self, mask: &ObjectMask) -> Self {
        self.pairs.push(("objectMask", mask.to_string()));
        self
    }

    /// Attach an object filter.
    #[must_use]
    pub fn filter(mut self, filter: &ObjectFilter) -> Self {
        self.pairs.push(("objectFilter", filter.to_string()));
        self
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
