//! Raw OpenStreetMap node as delivered by a node source.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// OpenStreetMap node identifier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OsmNodeId(i64);

impl OsmNodeId {
    /// Wrap a raw node identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw node identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for OsmNodeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OsmNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single node with its coordinates and raw tags.
///
/// Lives for one import call only. Tags never contain empty keys or values;
/// node sources drop those while parsing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsmNode {
    /// Identifier declared by the node document.
    pub id: OsmNodeId,
    /// Latitude in WGS84, when present and numeric.
    pub latitude: Option<f64>,
    /// Longitude in WGS84, when present and numeric.
    pub longitude: Option<f64>,
    /// Raw OSM tags keyed by tag key.
    pub tags: BTreeMap<String, String>,
}

impl OsmNode {
    /// Create a node without coordinates or tags.
    pub fn new(id: OsmNodeId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Add or replace a tag, returning the node for chaining.
    ///
    /// # Examples
    /// ```
    /// use campus_coffee::domain::{OsmNode, OsmNodeId};
    ///
    /// let node = OsmNode::new(OsmNodeId::new(1))
    ///     .with_tag("amenity", "cafe")
    ///     .with_tag("amenity", "bakery");
    /// assert_eq!(node.tag("amenity"), Some("bakery"));
    /// ```
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Look up a tag value by key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
