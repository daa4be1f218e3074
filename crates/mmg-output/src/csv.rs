//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `vertices.csv`
//! - `edges.csv`
//! - `switch_points.csv`
//! - `car_parkings.csv`
//!
//! plus `coords.csv` when opened with [`CsvGraphWriter::with_coords`].

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::GraphWriter;
use crate::{CoordRow, EdgeRow, OutputResult, ParkingLotRow, SwitchPointRow, VertexRow};

pub const VERTEX_HEADER: [&str; 6] = ["outdegree", "vertex_id", "osm_id", "mode_id", "lon", "lat"];
pub const EDGE_HEADER: [&str; 7] =
    ["length", "speed_factor", "mode_id", "from_id", "to_id", "edge_id", "osm_id"];
pub const SWITCH_POINT_HEADER: [&str; 9] = [
    "cost",
    "is_available",
    "from_mode_id",
    "to_mode_id",
    "type_id",
    "from_vertex_id",
    "to_vertex_id",
    "switch_point_id",
    "ref_poi_id",
];
pub const PARKING_LOT_HEADER: [&str; 4] = ["osm_id", "name", "lon", "lat"];
pub const COORD_HEADER: [&str; 3] = ["osm_id", "lon", "lat"];

/// Writes the graph to comma-separated files with header rows.
pub struct CsvGraphWriter {
    vertices:      Writer<File>,
    edges:         Writer<File>,
    switch_points: Writer<File>,
    parking_lots:  Writer<File>,
    coords:        Option<Writer<File>>,
    finished:      bool,
}

impl CsvGraphWriter {
    /// Create `dir` if needed, open the four graph files and write their
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            vertices:      open(dir, "vertices.csv", &VERTEX_HEADER)?,
            edges:         open(dir, "edges.csv", &EDGE_HEADER)?,
            switch_points: open(dir, "switch_points.csv", &SWITCH_POINT_HEADER)?,
            parking_lots:  open(dir, "car_parkings.csv", &PARKING_LOT_HEADER)?,
            coords:        None,
            finished:      false,
        })
    }

    /// Like [`new`](Self::new), and also open `coords.csv`.
    pub fn with_coords(dir: &Path) -> OutputResult<Self> {
        let mut w = Self::new(dir)?;
        w.coords = Some(open(dir, "coords.csv", &COORD_HEADER)?);
        Ok(w)
    }
}

fn open(dir: &Path, name: &str, header: &[&str]) -> OutputResult<Writer<File>> {
    let mut w = Writer::from_path(dir.join(name))?;
    w.write_record(header)?;
    Ok(w)
}

/// PostgreSQL boolean literal, as the downstream bulk loader expects.
fn pg_bool(b: bool) -> &'static str {
    if b { "t" } else { "f" }
}

impl GraphWriter for CsvGraphWriter {
    fn write_vertices(&mut self, rows: &[VertexRow]) -> OutputResult<()> {
        for row in rows {
            self.vertices.write_record(&[
                row.outdegree.to_string(),
                row.vertex_id.to_string(),
                row.osm_id.to_string(),
                row.mode_id.to_string(),
                row.lon.to_string(),
                row.lat.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()> {
        for row in rows {
            self.edges.write_record(&[
                row.length.to_string(),
                row.speed_factor.to_string(),
                row.mode_id.to_string(),
                row.from_id.to_string(),
                row.to_id.to_string(),
                row.edge_id.to_string(),
                row.osm_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_switch_points(&mut self, rows: &[SwitchPointRow]) -> OutputResult<()> {
        for row in rows {
            self.switch_points.write_record(&[
                row.cost.to_string(),
                pg_bool(row.is_available).to_owned(),
                row.from_mode_id.to_string(),
                row.to_mode_id.to_string(),
                row.type_id.to_string(),
                row.from_vertex_id.to_string(),
                row.to_vertex_id.to_string(),
                row.switch_point_id.to_string(),
                row.ref_poi_id.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_parking_lots(&mut self, rows: &[ParkingLotRow]) -> OutputResult<()> {
        for row in rows {
            self.parking_lots.write_record(&[
                row.osm_id.to_string(),
                row.name.clone(),
                row.lon.to_string(),
                row.lat.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_coords(&mut self, rows: &[CoordRow]) -> OutputResult<()> {
        let Some(coords) = self.coords.as_mut() else {
            return Ok(());
        };
        for row in rows {
            coords.write_record(&[row.osm_id.to_string(), row.lon.to_string(), row.lat.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.vertices.flush()?;
        self.edges.flush()?;
        self.switch_points.flush()?;
        self.parking_lots.flush()?;
        if let Some(coords) = self.coords.as_mut() {
            coords.flush()?;
        }
        Ok(())
    }
}
