//! `mmg-core`: foundational types for the multimodal graph builder.
//!
//! This crate is a dependency of every other `mmg-*` crate.  It intentionally
//! has no `mmg-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`mode`]   | `Mode`, `SwitchType` (stable numeric ids)                  |
//! | [`ids`]    | `VertexId`, `EdgeId`, `SwitchPointId`, decimal composition |
//! | [`geo`]    | `GeoPoint`, haversine distance, way length                 |
//! | [`record`] | `CoordRecord`, `NodeRecord`, `WayRecord`, `Tags`           |
//! | [`error`]  | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod mode;
pub mod record;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, SwitchPointId, VertexId};
pub use mode::{Mode, SwitchType};
pub use record::{CoordRecord, NodeRecord, Tags, WayRecord};
