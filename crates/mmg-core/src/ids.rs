//! Strongly typed identifiers and their decimal-concatenation layout.
//!
//! Every id handed to the path-search engine is derived, not allocated:
//!
//! ```text
//! vertex_id       = "{mode_id}{osm_node_id}"
//! edge_id         = "{mode_id}{osm_way_id}00"   (+1 for the backward edge)
//! switch_point_id = "{type_id}{poi_osm_id}"
//! ```
//!
//! read back as one decimal integer.  The same inputs always give the same
//! id, across runs and across machines.  Composition is checked: negative
//! parts or results past `i64::MAX` return [`CoreError::IdOutOfRange`]
//! instead of wrapping.  Mode ids are all two digits, so two different
//! `(mode, node)` pairs can never alias.

use std::fmt;

use crate::{CoreError, CoreResult, Mode, SwitchType};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw integer as written to the output files.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// One map node within one mode layer.
    pub struct VertexId(i64);
}

typed_id! {
    /// One directed traversal of a way within one mode layer.
    pub struct EdgeId(i64);
}

typed_id! {
    /// One transfer edge between two mode layers.
    pub struct SwitchPointId(i64);
}

/// Traversal direction of an edge relative to its way's node order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Forward,
    Backward,
}

// ── Composition ───────────────────────────────────────────────────────────────

/// Concatenate two non-negative integers in decimal: `(11, 42) → 1142`.
pub fn compose_id(prefix: i64, suffix: i64) -> CoreResult<i64> {
    let out_of_range = || CoreError::IdOutOfRange { prefix, suffix };
    if prefix < 0 || suffix < 0 {
        return Err(out_of_range());
    }
    let mut scale: i64 = 10;
    while scale <= suffix {
        scale = scale.checked_mul(10).ok_or_else(out_of_range)?;
    }
    prefix
        .checked_mul(scale)
        .and_then(|p| p.checked_add(suffix))
        .ok_or_else(out_of_range)
}

pub fn vertex_id(mode: Mode, osm_node_id: i64) -> CoreResult<VertexId> {
    compose_id(mode.id(), osm_node_id).map(VertexId)
}

/// Edge id for one direction of a way.  The fixed `00` suffix leaves room
/// for the backward edge at `forward + 1`.
pub fn edge_id(mode: Mode, osm_way_id: i64, direction: Direction) -> CoreResult<EdgeId> {
    let base = compose_id(mode.id(), osm_way_id)?;
    let forward = base
        .checked_mul(100)
        .ok_or(CoreError::IdOutOfRange { prefix: base, suffix: 0 })?;
    match direction {
        Direction::Forward  => Ok(EdgeId(forward)),
        Direction::Backward => forward
            .checked_add(1)
            .map(EdgeId)
            .ok_or(CoreError::IdOutOfRange { prefix: base, suffix: 1 }),
    }
}

pub fn switch_point_id(switch_type: SwitchType, poi_osm_id: i64) -> CoreResult<SwitchPointId> {
    compose_id(switch_type.id(), poi_osm_id).map(SwitchPointId)
}
