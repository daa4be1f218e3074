//! Per-mode graph synthesis from queued ways.
//!
//! Each valid way becomes one directed edge from its first to its last node
//! (the forward edge) plus, unless the way is tagged `oneway=yes`, the
//! reverse edge.  Intermediate nodes only contribute to the way's length.
//!
//! # Speed factor
//!
//! Cost per metre when optimizing for travel time, in minutes:
//!
//! ```text
//! speed_factor = 1 / (speed_kmph * 1000 / 60)
//! ```
//!
//! | Mode       | speed_kmph                                 |
//! |------------|--------------------------------------------|
//! | bicycle    | 15                                         |
//! | foot       | 4.5                                        |
//! | car        | `maxspeed` (default 30) × 0.618            |
//!
//! The 0.618 ratio discounts posted limits to observed average speeds.
//!
//! Invalid ways are tallied by reason and skipped; they never abort a build.

use thiserror::Error;

use mmg_core::geo::way_length;
use mmg_core::ids::{Direction, edge_id, vertex_id};
use mmg_core::{CoreError, Mode, WayRecord};

use crate::ingest::CoordinateTable;
use crate::network::{Edge, ModeGraph};

pub const BICYCLE_SPEED_KMPH:    f64 = 15.0;
pub const FOOT_SPEED_KMPH:       f64 = 4.5;
pub const DEFAULT_MAXSPEED_KMPH: f64 = 30.0;
/// Observed average speed relative to the posted `maxspeed`.
pub const CAR_SPEED_RATIO:       f64 = 0.618;
/// Speed factor for layers with no speed model.
pub const FALLBACK_SPEED_FACTOR: f64 = 0.005;

/// Log a progress line every this many ways.
const PROGRESS_INTERVAL: u64 = 100_000;

// ── Speed model ───────────────────────────────────────────────────────────────

/// Minutes required per metre at `speed_kmph`.
#[inline]
pub fn speed_factor(speed_kmph: f64) -> f64 {
    1.0 / (speed_kmph * 1000.0 / 60.0)
}

/// Parse a `maxspeed` tag.  Anything that is not a positive finite number
/// yields `None`.
pub fn parse_maxspeed(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Speed factor of `way` in the `mode` layer.
pub fn way_speed_factor(mode: Mode, way: &WayRecord) -> f64 {
    match mode {
        Mode::Bicycle    => speed_factor(BICYCLE_SPEED_KMPH),
        Mode::Foot       => speed_factor(FOOT_SPEED_KMPH),
        Mode::PrivateCar => way
            .tag("maxspeed")
            .and_then(parse_maxspeed)
            .map(|kmph| speed_factor(kmph * CAR_SPEED_RATIO))
            // Extreme tag values overflow to 0 or infinity.
            .filter(|f| f.is_finite() && *f > 0.0)
            .unwrap_or_else(|| speed_factor(DEFAULT_MAXSPEED_KMPH * CAR_SPEED_RATIO)),
        _ => FALLBACK_SPEED_FACTOR,
    }
}

/// `true` when the way may only be traversed in node order.
pub fn is_oneway(way: &WayRecord) -> bool {
    way.tag("oneway") == Some("yes")
}

// ── Invalid ways ──────────────────────────────────────────────────────────────

/// Why a way was not materialized.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidWay {
    #[error("way has no node references")]
    Empty,

    #[error("way starts and ends at node {0}")]
    SelfLoop(i64),

    #[error("way references node {0} with no coordinate")]
    MissingNode(i64),

    #[error("derived id out of range: {0}")]
    IdOutOfRange(CoreError),

    #[error("way was already materialized in this layer")]
    Duplicate,
}

/// Invalid-way tallies by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InvalidWayCounts {
    pub empty:           u64,
    pub self_loop:       u64,
    pub missing_node:    u64,
    pub id_out_of_range: u64,
    pub duplicate:       u64,
}

impl InvalidWayCounts {
    pub fn record(&mut self, reason: &InvalidWay) {
        match reason {
            InvalidWay::Empty           => self.empty += 1,
            InvalidWay::SelfLoop(_)     => self.self_loop += 1,
            InvalidWay::MissingNode(_)  => self.missing_node += 1,
            InvalidWay::IdOutOfRange(_) => self.id_out_of_range += 1,
            InvalidWay::Duplicate       => self.duplicate += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.empty + self.self_loop + self.missing_node + self.id_out_of_range + self.duplicate
    }
}

/// Counters for one layer's build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Ways offered to the builder.
    pub ways:    u64,
    /// Ways turned into edges.
    pub valid:   u64,
    pub edges:   u64,
    pub invalid: InvalidWayCounts,
}

// ── ModeGraphBuilder ──────────────────────────────────────────────────────────

/// Turns one mode's way queue into a [`ModeGraph`].
///
/// # Example
///
/// ```
/// use mmg_core::{GeoPoint, Mode, Tags, WayRecord};
/// use mmg_graph::{CoordinateTable, ModeGraphBuilder};
///
/// let mut coords = CoordinateTable::new();
/// coords.insert(1, GeoPoint::new(11.57, 48.13));
/// coords.insert(2, GeoPoint::new(11.58, 48.13));
///
/// let way = WayRecord { osm_id: 7, tags: Tags::new(), refs: vec![1, 2] };
/// let mut b = ModeGraphBuilder::new(Mode::Foot, &coords);
/// b.add_way(&way).unwrap();
/// let (graph, stats) = b.finish();
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// assert_eq!(stats.valid, 1);
/// ```
pub struct ModeGraphBuilder<'a> {
    coords: &'a CoordinateTable,
    graph:  ModeGraph,
    stats:  BuildStats,
}

impl<'a> ModeGraphBuilder<'a> {
    pub fn new(mode: Mode, coords: &'a CoordinateTable) -> Self {
        Self { coords, graph: ModeGraph::new(mode), stats: BuildStats::default() }
    }

    pub fn mode(&self) -> Mode {
        self.graph.mode
    }

    /// Validate and materialize one way.  Returns the number of edges
    /// created (1 for one-way, 2 otherwise).
    ///
    /// An invalid way is tallied in the stats and reported back; the graph
    /// is left untouched.
    pub fn add_way(&mut self, way: &WayRecord) -> Result<usize, InvalidWay> {
        self.stats.ways += 1;
        if self.stats.ways % PROGRESS_INTERVAL == 0 {
            log::debug!("{}: {} ways processed", self.graph.mode, self.stats.ways);
        }

        match self.materialize(way) {
            Ok(n) => {
                self.stats.valid += 1;
                self.stats.edges += n as u64;
                Ok(n)
            }
            Err(reason) => {
                log::debug!("{}: invalid way {}: {reason}", self.graph.mode, way.osm_id);
                self.stats.invalid.record(&reason);
                Err(reason)
            }
        }
    }

    /// Feed a whole queue, ignoring per-way outcomes (they are in the stats).
    pub fn add_ways<'w, I>(&mut self, ways: I)
    where
        I: IntoIterator<Item = &'w WayRecord>,
    {
        for way in ways {
            let _ = self.add_way(way);
        }
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Consume the builder and return the layer with its counters.
    pub fn finish(self) -> (ModeGraph, BuildStats) {
        log::info!(
            "{}: {} ways, {} valid, {} invalid → {} vertices, {} edges",
            self.graph.mode,
            self.stats.ways,
            self.stats.valid,
            self.stats.invalid.total(),
            self.graph.vertex_count(),
            self.graph.edge_count(),
        );
        (self.graph, self.stats)
    }

    fn materialize(&mut self, way: &WayRecord) -> Result<usize, InvalidWay> {
        let mode = self.graph.mode;

        // ── Validate ──────────────────────────────────────────────────────
        let (first, last) = way.endpoints().ok_or(InvalidWay::Empty)?;
        if first == last {
            return Err(InvalidWay::SelfLoop(first));
        }
        let length_m = way_length(&way.refs, |id| self.coords.get(id)).map_err(|e| match e {
            CoreError::MissingCoordinate(id) => InvalidWay::MissingNode(id),
            other => InvalidWay::IdOutOfRange(other),
        })?;

        // ── Derive ids ────────────────────────────────────────────────────
        let oneway = is_oneway(way);
        let from_id = vertex_id(mode, first).map_err(InvalidWay::IdOutOfRange)?;
        let to_id   = vertex_id(mode, last).map_err(InvalidWay::IdOutOfRange)?;
        let forward_id = edge_id(mode, way.osm_id, Direction::Forward)
            .map_err(InvalidWay::IdOutOfRange)?;
        let backward_id = if oneway {
            None
        } else {
            Some(edge_id(mode, way.osm_id, Direction::Backward).map_err(InvalidWay::IdOutOfRange)?)
        };
        if self.graph.contains_edge(forward_id) {
            return Err(InvalidWay::Duplicate);
        }

        // ── Materialize ───────────────────────────────────────────────────
        let speed_factor = way_speed_factor(mode, way);
        let (first_pos, last_pos) = match (self.coords.get(first), self.coords.get(last)) {
            (Some(a), Some(b)) => (a, b),
            (None, _) => return Err(InvalidWay::MissingNode(first)),
            (_, None) => return Err(InvalidWay::MissingNode(last)),
        };
        self.graph.ensure_vertex(from_id, first, first_pos);
        self.graph.ensure_vertex(to_id, last, last_pos);

        let forward = Edge {
            edge_id: forward_id,
            from_id,
            to_id,
            osm_id: way.osm_id,
            length_m,
            speed_factor,
            mode,
        };
        let inserted = self.graph.push_edge(forward);
        debug_assert!(inserted, "forward edge {forward_id} refused");

        match backward_id {
            None => Ok(1),
            Some(edge_id) => {
                let inserted = self.graph.push_edge(Edge {
                    edge_id,
                    from_id: to_id,
                    to_id:   from_id,
                    osm_id:  way.osm_id,
                    length_m,
                    speed_factor,
                    mode,
                });
                debug_assert!(inserted, "backward edge {edge_id} refused");
                Ok(2)
            }
        }
    }
}

/// Build one layer from its way queue.
pub fn build_mode_graph<'w, I>(mode: Mode, ways: I, coords: &CoordinateTable) -> (ModeGraph, BuildStats)
where
    I: IntoIterator<Item = &'w WayRecord>,
{
    let mut builder = ModeGraphBuilder::new(mode, coords);
    builder.add_ways(ways);
    builder.finish()
}
