//! Nearest-vertex search within one mode layer.
//!
//! # Pluggability
//!
//! Switch point construction calls the search through the
//! [`VertexLocator`] trait.  Both implementations return the vertex with the
//! minimum haversine distance:
//!
//! | Locator              | Cost per query | Tie-break              |
//! |----------------------|----------------|------------------------|
//! | `BruteForceLocator`  | O(V)           | lowest vertex id       |
//! | `RTreeLocator`       | O(log V)       | unspecified            |
//!
//! The R-tree indexes unit-sphere Cartesian points.  Chord length is a
//! monotonic function of great-circle distance, so Euclidean nearest in
//! that space is haversine nearest on the ground.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use mmg_core::{GeoPoint, VertexId};

use crate::network::ModeGraph;

/// Nearest-vertex query over one layer.
pub trait VertexLocator: Send + Sync {
    /// The vertex closest to `pos`, or `None` if the layer is empty.
    fn nearest(&self, pos: GeoPoint) -> Option<VertexId>;
}

/// Which [`VertexLocator`] the pipeline builds per layer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocatorKind {
    #[default]
    BruteForce,
    #[cfg_attr(feature = "serde", serde(rename = "rtree"))]
    RTree,
}

impl LocatorKind {
    pub fn locator<'g>(self, graph: &'g ModeGraph) -> Box<dyn VertexLocator + 'g> {
        match self {
            LocatorKind::BruteForce => Box::new(BruteForceLocator::new(graph)),
            LocatorKind::RTree      => Box::new(RTreeLocator::new(graph)),
        }
    }
}

impl std::str::FromStr for LocatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brute_force" => Ok(LocatorKind::BruteForce),
            "rtree"       => Ok(LocatorKind::RTree),
            other         => Err(format!("unknown locator {other:?}: expected \"brute_force\" or \"rtree\"")),
        }
    }
}

// ── BruteForceLocator ─────────────────────────────────────────────────────────

/// Linear scan over every vertex of the layer.
pub struct BruteForceLocator<'g> {
    graph: &'g ModeGraph,
}

impl<'g> BruteForceLocator<'g> {
    pub fn new(graph: &'g ModeGraph) -> Self {
        Self { graph }
    }
}

impl VertexLocator for BruteForceLocator<'_> {
    fn nearest(&self, pos: GeoPoint) -> Option<VertexId> {
        let mut best: Option<(VertexId, f64)> = None;
        for vertex in self.graph.vertices.values() {
            if vertex.mode != self.graph.mode {
                continue;
            }
            let d = pos.distance_m(vertex.pos);
            if best.is_none_or(|(_, min)| d < min) {
                best = Some((vertex.vertex_id, d));
            }
        }
        best.map(|(id, _)| id)
    }
}

// ── RTreeLocator ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a unit-sphere point with its vertex id.
#[derive(Clone)]
struct VertexEntry {
    point: [f64; 3],
    id:    VertexId,
}

impl RTreeObject for VertexEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for VertexEntry {
    /// Squared chord length.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Bulk-loaded R-tree over a layer's vertices.
pub struct RTreeLocator {
    tree: RTree<VertexEntry>,
}

impl RTreeLocator {
    /// O(V log V) bulk load.
    pub fn new(graph: &ModeGraph) -> Self {
        let entries: Vec<VertexEntry> = graph
            .vertices
            .values()
            .filter(|v| v.mode == graph.mode)
            .map(|v| VertexEntry { point: v.pos.to_unit_vector(), id: v.vertex_id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl VertexLocator for RTreeLocator {
    fn nearest(&self, pos: GeoPoint) -> Option<VertexId> {
        self.tree
            .nearest_neighbor(&pos.to_unit_vector())
            .map(|e| e.id)
    }
}
