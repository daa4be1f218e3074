//! Typed input records, as yielded by the map-data decoder.
//!
//! The builder never re-parses raw map formats; whatever decodes the source
//! file hands over these three record kinds.

use std::collections::HashMap;

use crate::GeoPoint;

/// Tag key/value pairs attached to a node or way.
pub type Tags = HashMap<String, String>;

/// A bare node position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordRecord {
    pub osm_id: i64,
    pub pos:    GeoPoint,
}

/// A tagged node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRecord {
    pub osm_id: i64,
    pub tags:   Tags,
    pub pos:    GeoPoint,
}

/// A tagged, ordered sequence of node references.
#[derive(Clone, Debug, PartialEq)]
pub struct WayRecord {
    pub osm_id: i64,
    pub tags:   Tags,
    pub refs:   Vec<i64>,
}

impl NodeRecord {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

impl WayRecord {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// First and last node reference, or `None` for an empty way.
    pub fn endpoints(&self) -> Option<(i64, i64)> {
        Some((*self.refs.first()?, *self.refs.last()?))
    }
}
