//! Structural acceptance gate.
//!
//! [`validate`] never fails; it returns a [`ValidationReport`] and leaves
//! the decision to the caller.  The pipeline treats any violation as fatal
//! and stops before switch points or output.

use std::collections::{BTreeSet, HashSet};

use mmg_core::{EdgeId, Mode, VertexId};

use crate::network::ModeGraph;

/// One broken invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    /// `out_degree` disagrees with the outgoing list.
    OutDegreeMismatch { claimed: u32, actual: usize },
    /// Two outgoing edges reach the same vertex.
    DuplicateTarget { to_id: VertexId },
    /// The outgoing list names an edge the edge table does not hold.
    DanglingEdge { edge_id: EdgeId },
    /// An edge's endpoint is missing from the vertex table.
    MissingEndpoint { edge_id: EdgeId },
    /// A vertex or edge filed under the wrong layer.
    ModeMismatch { found: Mode },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub vertex_id: VertexId,
    pub kind:      ViolationKind,
}

/// Outcome of validating one layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub mode:       Mode,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of distinct vertices with at least one violation.
    pub fn invalid_vertex_count(&self) -> usize {
        self.violations
            .iter()
            .map(|v| v.vertex_id)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Check every vertex and edge of `graph`.
pub fn validate(graph: &ModeGraph) -> ValidationReport {
    let mut violations = Vec::new();

    for vertex in graph.vertices.values() {
        let vertex_id = vertex.vertex_id;
        if vertex.mode != graph.mode {
            violations.push(Violation { vertex_id, kind: ViolationKind::ModeMismatch { found: vertex.mode } });
        }
        if vertex.out_degree as usize != vertex.outgoing.len() {
            violations.push(Violation {
                vertex_id,
                kind: ViolationKind::OutDegreeMismatch {
                    claimed: vertex.out_degree,
                    actual:  vertex.outgoing.len(),
                },
            });
        }

        let mut targets: HashSet<VertexId> = HashSet::with_capacity(vertex.outgoing.len());
        for &edge_id in &vertex.outgoing {
            match graph.edges.get(&edge_id) {
                None => violations.push(Violation { vertex_id, kind: ViolationKind::DanglingEdge { edge_id } }),
                Some(edge) => {
                    if !targets.insert(edge.to_id) {
                        violations.push(Violation {
                            vertex_id,
                            kind: ViolationKind::DuplicateTarget { to_id: edge.to_id },
                        });
                    }
                }
            }
        }
    }

    for edge in graph.edges.values() {
        for endpoint in [edge.from_id, edge.to_id] {
            if !graph.vertices.contains_key(&endpoint) {
                violations.push(Violation {
                    vertex_id: endpoint,
                    kind:      ViolationKind::MissingEndpoint { edge_id: edge.edge_id },
                });
            }
        }
        if edge.mode != graph.mode {
            violations.push(Violation { vertex_id: edge.from_id, kind: ViolationKind::ModeMismatch { found: edge.mode } });
        }
    }

    let report = ValidationReport { mode: graph.mode, violations };
    if report.is_valid() {
        log::info!("{}: graph valid", graph.mode);
    } else {
        for v in &report.violations {
            log::error!("{}: invalid vertex {}: {:?}", graph.mode, v.vertex_id, v.kind);
        }
        log::error!("{}: found {} invalid vertices", graph.mode, report.invalid_vertex_count());
    }
    report
}
