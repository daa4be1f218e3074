//! Plain data row types written by output backends.
//!
//! Each row holds exactly the columns of one output file, already reduced
//! to raw integers so backends need no knowledge of the graph types.

use mmg_core::GeoPoint;
use mmg_graph::{Edge, ParkingLot, SwitchPoint, Vertex};

/// One line of `vertices.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexRow {
    pub outdegree: u32,
    pub vertex_id: i64,
    pub osm_id:    i64,
    pub mode_id:   i64,
    pub lon:       f64,
    pub lat:       f64,
}

impl From<&Vertex> for VertexRow {
    fn from(v: &Vertex) -> Self {
        Self {
            outdegree: v.out_degree,
            vertex_id: v.vertex_id.get(),
            osm_id:    v.osm_id,
            mode_id:   v.mode.id(),
            lon:       v.pos.lon,
            lat:       v.pos.lat,
        }
    }
}

/// One line of `edges.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRow {
    /// Metres.
    pub length:       f64,
    /// Minutes per metre.
    pub speed_factor: f64,
    pub mode_id:      i64,
    pub from_id:      i64,
    pub to_id:        i64,
    pub edge_id:      i64,
    pub osm_id:       i64,
}

impl From<&Edge> for EdgeRow {
    fn from(e: &Edge) -> Self {
        Self {
            length:       e.length_m,
            speed_factor: e.speed_factor,
            mode_id:      e.mode.id(),
            from_id:      e.from_id.get(),
            to_id:        e.to_id.get(),
            edge_id:      e.edge_id.get(),
            osm_id:       e.osm_id,
        }
    }
}

/// One line of `switch_points.csv`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchPointRow {
    pub cost:            f64,
    pub is_available:    bool,
    pub from_mode_id:    i64,
    pub to_mode_id:      i64,
    pub type_id:         i64,
    pub from_vertex_id:  i64,
    pub to_vertex_id:    i64,
    pub switch_point_id: i64,
    pub ref_poi_id:      i64,
}

impl From<&SwitchPoint> for SwitchPointRow {
    fn from(sp: &SwitchPoint) -> Self {
        Self {
            cost:            sp.cost,
            is_available:    sp.is_available,
            from_mode_id:    sp.from_mode.id(),
            to_mode_id:      sp.to_mode.id(),
            type_id:         sp.switch_type.id(),
            from_vertex_id:  sp.from_vertex_id.get(),
            to_vertex_id:    sp.to_vertex_id.get(),
            switch_point_id: sp.switch_point_id.get(),
            ref_poi_id:      sp.ref_poi_id,
        }
    }
}

/// One line of `car_parkings.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingLotRow {
    pub osm_id: i64,
    /// Already free of commas.
    pub name:   String,
    pub lon:    f64,
    pub lat:    f64,
}

impl From<&ParkingLot> for ParkingLotRow {
    fn from(lot: &ParkingLot) -> Self {
        Self { osm_id: lot.osm_id, name: lot.name.clone(), lon: lot.pos.lon, lat: lot.pos.lat }
    }
}

/// One line of the optional `coords.csv` debug dump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordRow {
    pub osm_id: i64,
    pub lon:    f64,
    pub lat:    f64,
}

impl From<(i64, GeoPoint)> for CoordRow {
    fn from((osm_id, pos): (i64, GeoPoint)) -> Self {
        Self { osm_id, lon: pos.lon, lat: pos.lat }
    }
}
