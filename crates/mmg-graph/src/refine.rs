//! Hyper-edge removal.
//!
//! Two ways joining the same pair of endpoints produce parallel edges
//! between one ordered vertex pair.  Only the shortest survives.
//!
//! The scan is read-only and collects a removal list per vertex; removals
//! are applied in a second pass.
//!
//! Tie-break: with equal lengths the edge seen first in the vertex's
//! outgoing list is kept and the later one removed.

use std::collections::HashMap;

use mmg_core::{EdgeId, VertexId};

use crate::network::ModeGraph;

/// What one refinement pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefineStats {
    pub edges_removed:    u64,
    pub vertices_touched: u64,
}

impl RefineStats {
    pub fn is_noop(&self) -> bool {
        self.edges_removed == 0
    }
}

/// Remove every parallel edge except the shortest, per ordered vertex pair.
///
/// Running it again on its own output changes nothing.
pub fn refine(graph: &mut ModeGraph) -> RefineStats {
    // ── Scan ──────────────────────────────────────────────────────────────
    let mut removals: Vec<(VertexId, Vec<EdgeId>)> = Vec::new();

    for vertex in graph.vertices.values() {
        if vertex.out_degree <= 1 {
            continue;
        }
        // target → edge currently kept for it
        let mut kept: HashMap<VertexId, (EdgeId, f64)> = HashMap::with_capacity(vertex.outgoing.len());
        let mut marked: Vec<EdgeId> = Vec::new();

        for &edge_id in &vertex.outgoing {
            let Some(edge) = graph.edges.get(&edge_id) else {
                continue;
            };
            match kept.get_mut(&edge.to_id) {
                None => {
                    kept.insert(edge.to_id, (edge_id, edge.length_m));
                }
                Some(slot) => {
                    if slot.1 > edge.length_m {
                        marked.push(slot.0);
                        *slot = (edge_id, edge.length_m);
                    } else {
                        marked.push(edge_id);
                    }
                }
            }
        }

        if !marked.is_empty() {
            removals.push((vertex.vertex_id, marked));
        }
    }

    // ── Apply ─────────────────────────────────────────────────────────────
    let mut stats = RefineStats::default();
    for (vertex_id, marked) in removals {
        let Some(vertex) = graph.vertices.get_mut(&vertex_id) else {
            continue;
        };
        vertex.outgoing.retain(|e| !marked.contains(e));
        vertex.out_degree = vertex.out_degree.saturating_sub(marked.len() as u32);
        for edge_id in &marked {
            graph.edges.remove(edge_id);
        }
        stats.edges_removed += marked.len() as u64;
        stats.vertices_touched += 1;
    }

    if !stats.is_noop() {
        log::info!(
            "{}: removed {} hyper-edges at {} vertices",
            graph.mode,
            stats.edges_removed,
            stats.vertices_touched,
        );
    }
    stats
}
