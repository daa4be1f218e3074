//! Per-mode vertex and edge tables.
//!
//! # Data layout
//!
//! Each mode layer owns two arena-style tables keyed by derived id:
//!
//! ```text
//! vertices: VertexId → Vertex { out_degree, outgoing: [EdgeId, ..] }
//! edges:    EdgeId   → Edge   { from_id, to_id, length_m, speed_factor }
//! ```
//!
//! Vertices reference their outgoing edges by id rather than by pointer, so
//! the refiner can drop an edge from both tables without aliasing.  Both
//! tables are `BTreeMap`s: iteration is in ascending id order, which keeps
//! output files and nearest-vertex tie-breaks identical across runs.
//!
//! Layers share nothing with each other, so they can be built on separate
//! threads.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use mmg_core::{EdgeId, GeoPoint, Mode, VertexId};

// ── Vertex ────────────────────────────────────────────────────────────────────

/// One raw map node within one mode layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub vertex_id:  VertexId,
    pub mode:       Mode,
    /// Raw map node id.
    pub osm_id:     i64,
    pub pos:        GeoPoint,
    /// Claimed number of outgoing edges.  Kept as its own field so the
    /// validator can check it against `outgoing`.
    pub out_degree: u32,
    /// Outgoing edges in insertion order.
    pub outgoing:   Vec<EdgeId>,
}

impl Vertex {
    fn new(vertex_id: VertexId, mode: Mode, osm_id: i64, pos: GeoPoint) -> Self {
        Self { vertex_id, mode, osm_id, pos, out_degree: 0, outgoing: Vec::new() }
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// One directed traversal between two vertices of the same layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub edge_id:      EdgeId,
    pub from_id:      VertexId,
    pub to_id:        VertexId,
    /// Source way id.
    pub osm_id:       i64,
    /// Way length in metres (≥ 0).
    pub length_m:     f64,
    /// Minutes per metre (> 0).
    pub speed_factor: f64,
    pub mode:         Mode,
}

// ── ModeGraph ─────────────────────────────────────────────────────────────────

/// Directed graph for a single mode.
///
/// Fields are `pub` for direct read access by the refiner, validator and
/// writers.  Insert through [`ModeGraph::ensure_vertex`] and
/// [`ModeGraph::push_edge`] so out-degrees stay in step.
#[derive(Clone, Debug)]
pub struct ModeGraph {
    pub mode:     Mode,
    pub vertices: BTreeMap<VertexId, Vertex>,
    pub edges:    BTreeMap<EdgeId, Edge>,
}

impl ModeGraph {
    pub fn new(mode: Mode) -> Self {
        Self { mode, vertices: BTreeMap::new(), edges: BTreeMap::new() }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Iterator over the outgoing edges of `vertex`, skipping any id the
    /// edge table no longer holds.
    pub fn out_edges(&self, vertex: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertices
            .get(&vertex)
            .into_iter()
            .flat_map(|v| v.outgoing.iter())
            .filter_map(|id| self.edges.get(id))
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Return the vertex for `vertex_id`, creating it with out-degree 0 on
    /// first sight.
    pub fn ensure_vertex(&mut self, vertex_id: VertexId, osm_id: i64, pos: GeoPoint) -> &mut Vertex {
        let mode = self.mode;
        self.vertices
            .entry(vertex_id)
            .or_insert_with(|| Vertex::new(vertex_id, mode, osm_id, pos))
    }

    /// Insert `edge` and record it on its source vertex, which must already
    /// exist.
    ///
    /// Returns `false` (and changes nothing) if the edge id is already taken
    /// or the source vertex is unknown.
    pub fn push_edge(&mut self, edge: Edge) -> bool {
        let Some(source) = self.vertices.get_mut(&edge.from_id) else {
            return false;
        };
        match self.edges.entry(edge.edge_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                source.out_degree += 1;
                source.outgoing.push(edge.edge_id);
                slot.insert(edge);
                true
            }
        }
    }
}
