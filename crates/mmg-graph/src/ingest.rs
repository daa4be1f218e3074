//! Record ingestion: coordinate table, POI extraction and per-mode way queues.
//!
//! [`Ingest`] consumes the three record streams the map decoder produces.
//! After ingestion everything in it is read-only and shared by the mode
//! builders.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use mmg_core::{CoordRecord, GeoPoint, Mode, NodeRecord, WayRecord};

use crate::classify::classify_way;

// ── CoordinateTable ───────────────────────────────────────────────────────────

/// Raw node id → position, for O(1) lookup while resolving way references.
#[derive(Clone, Debug, Default)]
pub struct CoordinateTable {
    positions: FxHashMap<i64, GeoPoint>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the position of `osm_id`.
    pub fn insert(&mut self, osm_id: i64, pos: GeoPoint) {
        self.positions.insert(osm_id, pos);
    }

    #[inline]
    pub fn get(&self, osm_id: i64) -> Option<GeoPoint> {
        self.positions.get(&osm_id).copied()
    }

    #[inline]
    pub fn contains(&self, osm_id: i64) -> bool {
        self.positions.contains_key(&osm_id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// All entries sorted by node id.
    pub fn sorted(&self) -> Vec<(i64, GeoPoint)> {
        let mut out: Vec<_> = self.positions.iter().map(|(&id, &p)| (id, p)).collect();
        out.sort_unstable_by_key(|&(id, _)| id);
        out
    }
}

impl FromIterator<CoordRecord> for CoordinateTable {
    fn from_iter<I: IntoIterator<Item = CoordRecord>>(iter: I) -> Self {
        let mut table = CoordinateTable::new();
        for c in iter {
            table.insert(c.osm_id, c.pos);
        }
        table
    }
}

// ── ParkingLot ────────────────────────────────────────────────────────────────

/// A parking amenity node, anchoring car → foot switch points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkingLot {
    pub osm_id: i64,
    /// Display name with every `,` replaced by `;`.
    pub name:   String,
    pub pos:    GeoPoint,
}

impl ParkingLot {
    /// Extract a parking lot from a node tagged `amenity=parking`.
    pub fn from_node(node: &NodeRecord) -> Option<ParkingLot> {
        if node.tag("amenity") != Some("parking") {
            return None;
        }
        Some(ParkingLot {
            osm_id: node.osm_id,
            name:   sanitize_name(node.tag("name").unwrap_or("")),
            pos:    node.pos,
        })
    }
}

/// Keep names from splitting a comma-separated row.
pub fn sanitize_name(name: &str) -> String {
    name.replace(',', ";")
}

// ── Ingest ────────────────────────────────────────────────────────────────────

/// Counters gathered while consuming the input streams.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub coords:            u64,
    pub nodes:             u64,
    /// Ways carrying a `highway` tag.
    pub highway_ways:      u64,
    pub relations:         u64,
    pub parking_lot_nodes: u64,
    /// Ways queued per street mode.
    pub mode_ways:         BTreeMap<Mode, u64>,
}

/// Everything the graph stages need from the input records.
#[derive(Debug, Default)]
pub struct Ingest {
    pub coords:       CoordinateTable,
    /// Parking lots keyed by node id.
    pub parking_lots: BTreeMap<i64, ParkingLot>,
    /// Every classified way, stored once.
    pub ways:         Vec<WayRecord>,
    /// Indices into `ways`, per street mode, in input order.
    pub queues:       BTreeMap<Mode, Vec<usize>>,
    pub stats:        IngestStats,
}

impl Ingest {
    pub fn new() -> Self {
        let mut queues = BTreeMap::new();
        let mut mode_ways = BTreeMap::new();
        for mode in Mode::STREET {
            queues.insert(mode, Vec::new());
            mode_ways.insert(mode, 0);
        }
        Self {
            queues,
            stats: IngestStats { mode_ways, ..Default::default() },
            ..Default::default()
        }
    }

    pub fn coord(&mut self, record: CoordRecord) {
        self.stats.coords += 1;
        self.coords.insert(record.osm_id, record.pos);
    }

    pub fn coords<I: IntoIterator<Item = CoordRecord>>(&mut self, records: I) {
        records.into_iter().for_each(|c| self.coord(c));
    }

    /// Register a tagged node.  Its position also fills the coordinate table
    /// when the coordinate stream did not already carry it.
    pub fn node(&mut self, record: NodeRecord) {
        self.stats.nodes += 1;
        if !self.coords.contains(record.osm_id) {
            self.coords.insert(record.osm_id, record.pos);
        }
        if let Some(lot) = ParkingLot::from_node(&record) {
            self.stats.parking_lot_nodes += 1;
            self.parking_lots.insert(lot.osm_id, lot);
        }
    }

    pub fn nodes<I: IntoIterator<Item = NodeRecord>>(&mut self, records: I) {
        records.into_iter().for_each(|n| self.node(n));
    }

    /// Classify a way and queue it for every layer it qualifies for.  Ways
    /// without a `highway` tag, or that qualify for no layer, are dropped.
    pub fn way(&mut self, record: WayRecord) {
        let Some(modes) = classify_way(&record) else {
            return;
        };
        self.stats.highway_ways += 1;
        if modes.is_empty() {
            return;
        }
        let index = self.ways.len();
        for mode in modes.iter() {
            self.queues.entry(mode).or_default().push(index);
            *self.stats.mode_ways.entry(mode).or_default() += 1;
        }
        self.ways.push(record);
    }

    pub fn ways<I: IntoIterator<Item = WayRecord>>(&mut self, records: I) {
        records.into_iter().for_each(|w| self.way(w));
    }

    /// Relations carry nothing the street layers use; they are only counted.
    pub fn relation(&mut self) {
        self.stats.relations += 1;
    }

    /// Ways queued for `mode`, in input order.
    pub fn queue(&self, mode: Mode) -> impl Iterator<Item = &WayRecord> + '_ {
        self.queues
            .get(&mode)
            .into_iter()
            .flatten()
            .map(|&i| &self.ways[i])
    }
}
