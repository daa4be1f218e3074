//! End-to-end graph construction.
//!
//! ```text
//! Ingest ─┬─ car     → build → refine ─┐
//!         ├─ foot    → build → refine ─┼─ validate all ─ switch points ─ MultimodalGraph
//!         └─ bicycle → build → refine ─┘      (fatal)
//! ```
//!
//! Layers share nothing but the read-only [`Ingest`], so with the
//! `parallel` feature they are built on Rayon's thread pool.  Validation is
//! the barrier: switch points are only built once every layer passed.

use std::collections::{BTreeMap, BTreeSet};

use mmg_core::{Mode, SwitchPointId, SwitchType};

use crate::builder::{BuildStats, build_mode_graph};
use crate::ingest::{Ingest, IngestStats, ParkingLot};
use crate::locate::LocatorKind;
use crate::network::ModeGraph;
use crate::refine::{RefineStats, refine};
use crate::switch::{Anchor, SwitchPoint, SwitchPointBuilder, SwitchRule, SwitchStats};
use crate::validate::validate;
use crate::{GraphError, GraphResult};

// ── Outputs ───────────────────────────────────────────────────────────────────

/// The validated layers plus the switch points joining them.
#[derive(Debug, Default)]
pub struct MultimodalGraph {
    pub layers:        BTreeMap<Mode, ModeGraph>,
    pub switch_points: BTreeMap<SwitchPointId, SwitchPoint>,
    /// Parking lots found during ingestion, in id order.
    pub parking_lots:  Vec<ParkingLot>,
}

impl MultimodalGraph {
    pub fn vertex_count(&self) -> usize {
        self.layers.values().map(ModeGraph::vertex_count).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.layers.values().map(ModeGraph::edge_count).sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerSummary {
    pub build:    BuildStats,
    pub refine:   RefineStats,
    pub vertices: usize,
    pub edges:    usize,
}

/// Observable run counters.  Not part of the correctness contract.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ingest:        IngestStats,
    pub layers:        BTreeMap<Mode, LayerSummary>,
    pub switches:      BTreeMap<SwitchType, SwitchStats>,
    pub switch_points: usize,
}

impl RunSummary {
    pub fn invalid_ways(&self) -> u64 {
        self.layers.values().map(|l| l.build.invalid.total()).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.layers.values().map(|l| l.vertices).sum()
    }

    pub fn edge_count(&self) -> usize {
        self.layers.values().map(|l| l.edges).sum()
    }

    /// Write the summary to the log at `info` level.
    pub fn log(&self) {
        log::info!("node count: {}", self.ingest.nodes);
        log::info!("coords count: {}", self.ingest.coords);
        log::info!("highway way count: {}", self.ingest.highway_ways);
        log::info!("relation count: {}", self.ingest.relations);
        log::info!("parking lots in nodes: {}", self.ingest.parking_lot_nodes);
        for (mode, n) in &self.ingest.mode_ways {
            log::info!("{mode} way segments: {n}");
        }
        log::info!("vertex count: {}", self.vertex_count());
        log::info!("edge count: {}", self.edge_count());
        log::info!("switch point count: {}", self.switch_points);
        log::info!("invalid ways: {}", self.invalid_ways());
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Configured run of every graph stage.
///
/// # Example
///
/// ```rust,ignore
/// let mut ingest = Ingest::new();
/// ingest.coords(coords);
/// ingest.nodes(nodes);
/// ingest.ways(ways);
/// let (graph, summary) = Pipeline::new().locator(LocatorKind::RTree).run(&ingest)?;
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    modes:    Vec<Mode>,
    rules:    Vec<SwitchRule>,
    locator:  LocatorKind,
    parallel: bool,
}

impl Pipeline {
    /// All street layers, the default switch rules, brute-force search.
    pub fn new() -> Self {
        Self {
            modes:    Mode::STREET.to_vec(),
            rules:    SwitchRule::defaults(),
            locator:  LocatorKind::default(),
            parallel: true,
        }
    }

    /// Layers to build.  Duplicates are ignored.
    pub fn modes(mut self, modes: impl IntoIterator<Item = Mode>) -> Self {
        let mut modes: Vec<Mode> = modes.into_iter().collect();
        modes.sort_unstable();
        modes.dedup();
        self.modes = modes;
        self
    }

    /// Switch rules to apply.  Switch point ids only carry the switch type
    /// and the POI id, so only the first rule per switch type is kept.
    pub fn rules(mut self, rules: Vec<SwitchRule>) -> Self {
        let mut seen = BTreeSet::new();
        self.rules = rules
            .into_iter()
            .filter(|rule| {
                let first = seen.insert(rule.switch_type);
                if !first {
                    log::warn!("{}: duplicate switch rule ignored", rule.switch_type);
                }
                first
            })
            .collect();
        self
    }

    pub fn locator(mut self, locator: LocatorKind) -> Self {
        self.locator = locator;
        self
    }

    /// Build layers concurrently.  Has no effect without the `parallel`
    /// feature.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every stage over `ingest`.
    ///
    /// # Errors
    ///
    /// [`GraphError::Validation`] for the first layer that fails
    /// validation.  No switch points are built in that case.
    pub fn run(&self, ingest: &Ingest) -> GraphResult<(MultimodalGraph, RunSummary)> {
        let mut summary = RunSummary { ingest: ingest.stats.clone(), ..Default::default() };

        // ── Build + refine ────────────────────────────────────────────────
        let mut layers = BTreeMap::new();
        for (graph, build, refine) in self.build_layers(ingest) {
            summary.layers.insert(graph.mode, LayerSummary {
                build,
                refine,
                vertices: graph.vertex_count(),
                edges:    graph.edge_count(),
            });
            layers.insert(graph.mode, graph);
        }

        validate_layers(&layers)?;

        // ── Switch points ─────────────────────────────────────────────────
        let mut switch_points = BTreeMap::new();
        {
            let builder = SwitchPointBuilder::new(&layers, self.locator);
            for rule in &self.rules {
                let anchors = anchors_for(rule.switch_type, ingest);
                let (points, stats) = builder.build(rule, anchors);
                let entry = summary.switches.entry(rule.switch_type).or_default();
                entry.anchors += stats.anchors;
                entry.created += stats.created;
                entry.skipped += stats.skipped;
                for sp in points {
                    switch_points.insert(sp.switch_point_id, sp);
                }
            }
        }
        summary.switch_points = switch_points.len();

        let graph = MultimodalGraph {
            layers,
            switch_points,
            parking_lots: ingest.parking_lots.values().cloned().collect(),
        };
        Ok((graph, summary))
    }

    fn build_layers(&self, ingest: &Ingest) -> Vec<(ModeGraph, BuildStats, RefineStats)> {
        #[cfg(feature = "parallel")]
        if self.parallel {
            use rayon::prelude::*;

            return self
                .modes
                .par_iter()
                .map(|&mode| build_layer(mode, ingest))
                .collect();
        }

        self.modes.iter().map(|&mode| build_layer(mode, ingest)).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation barrier.  Every layer is checked and logged; the first
/// failing layer (in mode order) becomes the error.
pub fn validate_layers(layers: &BTreeMap<Mode, ModeGraph>) -> GraphResult<()> {
    let mut failure: Option<GraphError> = None;
    for graph in layers.values() {
        let report = validate(graph);
        if !report.is_valid() && failure.is_none() {
            failure = Some(GraphError::Validation {
                mode:             graph.mode,
                invalid_vertices: report.invalid_vertex_count(),
                report:           Box::new(report),
            });
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn build_layer(mode: Mode, ingest: &Ingest) -> (ModeGraph, BuildStats, RefineStats) {
    if !mode.is_street() {
        log::warn!("{mode}: no way source for this layer, it stays empty");
    }
    let (mut graph, build) = build_mode_graph(mode, ingest.queue(mode), &ingest.coords);
    let refined = refine(&mut graph);
    (graph, build, refined)
}

/// POIs anchoring switch points of `switch_type`.
fn anchors_for(switch_type: SwitchType, ingest: &Ingest) -> Vec<Anchor> {
    match switch_type {
        SwitchType::CarParking => ingest.parking_lots.values().map(Anchor::from).collect(),
        other => {
            log::warn!("{other}: no POI source for this switch type");
            Vec::new()
        }
    }
}
