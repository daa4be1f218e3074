//! `mmg-graph`: per-mode graph construction for the multimodal graph builder.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`classify`] | highway tag tables, `ModeSet`                                |
//! | [`ingest`]   | `CoordinateTable`, `ParkingLot`, `Ingest`                    |
//! | [`network`]  | `ModeGraph`, `Vertex`, `Edge`                                |
//! | [`builder`]  | `ModeGraphBuilder`, speed factors, invalid-way tallies       |
//! | [`refine`]   | hyper-edge removal                                           |
//! | [`validate`] | `ValidationReport`                                           |
//! | [`locate`]   | `VertexLocator` trait, brute-force and R-tree locators       |
//! | [`switch`]   | `SwitchRule`, `SwitchPoint`, `SwitchPointBuilder`            |
//! | [`pipeline`] | `Pipeline`, `MultimodalGraph`, `RunSummary`                  |
//! | [`osm`]      | `read_pbf` (feature = `"osm"` only)                          |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `osm`      | Enables OSM PBF decoding via the `osmpbf` crate.          |
//! | `parallel` | Builds layers on Rayon's thread pool.                     |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod builder;
pub mod classify;
pub mod error;
pub mod ingest;
pub mod locate;
pub mod network;
pub mod pipeline;
pub mod refine;
pub mod switch;
pub mod validate;

#[cfg(feature = "osm")]
pub mod osm;


pub use builder::{BuildStats, InvalidWay, ModeGraphBuilder, build_mode_graph};
pub use classify::{ModeSet, classify_highway, classify_way};
pub use error::{GraphError, GraphResult};
pub use ingest::{CoordinateTable, Ingest, IngestStats, ParkingLot};
pub use locate::{BruteForceLocator, LocatorKind, RTreeLocator, VertexLocator};
pub use network::{Edge, ModeGraph, Vertex};
pub use pipeline::{MultimodalGraph, Pipeline, RunSummary, validate_layers};
pub use refine::{RefineStats, refine};
pub use switch::{Anchor, SwitchPoint, SwitchPointBuilder, SwitchRule};
pub use validate::{ValidationReport, Violation, ViolationKind, validate};
