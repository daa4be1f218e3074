//! Switch points: transfer edges between two mode layers at a POI.
//!
//! For every anchor POI of a [`SwitchRule`] the nearest vertex in the
//! rule's source layer and the nearest vertex in its target layer are
//! joined by one [`SwitchPoint`] carrying the rule's fixed cost.  A POI
//! that cannot be resolved in either layer is skipped, never fatal.

use std::collections::BTreeMap;

use mmg_core::ids::switch_point_id;
use mmg_core::{GeoPoint, Mode, SwitchPointId, SwitchType, VertexId};

use crate::ingest::ParkingLot;
use crate::locate::{LocatorKind, VertexLocator};
use crate::network::ModeGraph;

/// Transfer penalty for leaving a car at a parking lot, in minutes.
pub const CAR_PARKING_COST: f64 = 3.0;

// ── SwitchRule ────────────────────────────────────────────────────────────────

/// Which layers a switch type bridges and what the transfer costs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchRule {
    pub switch_type: SwitchType,
    pub from_mode:   Mode,
    pub to_mode:     Mode,
    pub cost:        f64,
}

impl SwitchRule {
    /// Park the car, continue on foot.
    pub fn car_parking() -> Self {
        Self {
            switch_type: SwitchType::CarParking,
            from_mode:   Mode::PrivateCar,
            to_mode:     Mode::Foot,
            cost:        CAR_PARKING_COST,
        }
    }

    /// Rules applied when none are configured.
    pub fn defaults() -> Vec<SwitchRule> {
        vec![SwitchRule::car_parking()]
    }
}

/// A point of interest anchoring a transfer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Anchor {
    pub osm_id: i64,
    pub pos:    GeoPoint,
}

impl From<&ParkingLot> for Anchor {
    fn from(lot: &ParkingLot) -> Self {
        Anchor { osm_id: lot.osm_id, pos: lot.pos }
    }
}

// ── SwitchPoint ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchPoint {
    pub switch_point_id: SwitchPointId,
    pub cost:            f64,
    pub is_available:    bool,
    pub from_mode:       Mode,
    pub to_mode:         Mode,
    pub switch_type:     SwitchType,
    pub from_vertex_id:  VertexId,
    pub to_vertex_id:    VertexId,
    /// OSM id of the anchoring POI.
    pub ref_poi_id:      i64,
}

/// Counters for one rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwitchStats {
    pub anchors: u64,
    pub created: u64,
    pub skipped: u64,
}

// ── SwitchPointBuilder ────────────────────────────────────────────────────────

/// Links fully built, refined and validated layers at anchor POIs.
pub struct SwitchPointBuilder<'g> {
    graphs:  &'g BTreeMap<Mode, ModeGraph>,
    locator: LocatorKind,
}

impl<'g> SwitchPointBuilder<'g> {
    pub fn new(graphs: &'g BTreeMap<Mode, ModeGraph>, locator: LocatorKind) -> Self {
        Self { graphs, locator }
    }

    /// Build one switch point per anchor for `rule`.
    ///
    /// If either layer is missing or empty, every anchor is skipped.
    pub fn build<I>(&self, rule: &SwitchRule, anchors: I) -> (Vec<SwitchPoint>, SwitchStats)
    where
        I: IntoIterator<Item = Anchor>,
    {
        let mut stats = SwitchStats::default();
        let anchors: Vec<Anchor> = anchors.into_iter().collect();
        stats.anchors = anchors.len() as u64;

        let (from_graph, to_graph) = match (self.layer(rule.from_mode), self.layer(rule.to_mode)) {
            (Some(f), Some(t)) => (f, t),
            _ => {
                log::warn!(
                    "{}: {} or {} layer is empty, skipping {} anchors",
                    rule.switch_type,
                    rule.from_mode,
                    rule.to_mode,
                    anchors.len(),
                );
                stats.skipped = stats.anchors;
                return (Vec::new(), stats);
            }
        };
        let from_locator = self.locator.locator(from_graph);
        let to_locator   = self.locator.locator(to_graph);

        let mut out = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            match link(rule, &anchor, from_locator.as_ref(), to_locator.as_ref()) {
                Some(sp) => {
                    log::debug!(
                        "{}: POI {} → {} / {}",
                        rule.switch_type,
                        anchor.osm_id,
                        sp.from_vertex_id,
                        sp.to_vertex_id,
                    );
                    stats.created += 1;
                    out.push(sp);
                }
                None => {
                    log::warn!("{}: no switch point for POI {}", rule.switch_type, anchor.osm_id);
                    stats.skipped += 1;
                }
            }
        }

        log::info!(
            "{}: {} switch points from {} anchors ({} skipped)",
            rule.switch_type,
            stats.created,
            stats.anchors,
            stats.skipped,
        );
        (out, stats)
    }

    fn layer(&self, mode: Mode) -> Option<&'g ModeGraph> {
        self.graphs.get(&mode).filter(|g| !g.is_empty())
    }
}

fn link(
    rule:         &SwitchRule,
    anchor:       &Anchor,
    from_locator: &dyn VertexLocator,
    to_locator:   &dyn VertexLocator,
) -> Option<SwitchPoint> {
    let from_vertex_id = from_locator.nearest(anchor.pos)?;
    let to_vertex_id   = to_locator.nearest(anchor.pos)?;
    let id = match switch_point_id(rule.switch_type, anchor.osm_id) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("{}: POI {}: {e}", rule.switch_type, anchor.osm_id);
            return None;
        }
    };
    Some(SwitchPoint {
        switch_point_id: id,
        cost:            rule.cost,
        is_available:    true,
        from_mode:       rule.from_mode,
        to_mode:         rule.to_mode,
        switch_type:     rule.switch_type,
        from_vertex_id,
        to_vertex_id,
        ref_poi_id:      anchor.osm_id,
    })
}
