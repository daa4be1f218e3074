//! The `GraphWriter` trait and the driver that feeds it a whole graph.

use mmg_graph::{CoordinateTable, MultimodalGraph};

use crate::{CoordRow, EdgeRow, OutputResult, ParkingLotRow, SwitchPointRow, VertexRow};

/// Trait implemented by every output backend.
///
/// Each `write_*` call may be made any number of times; rows are appended.
pub trait GraphWriter {
    fn write_vertices(&mut self, rows: &[VertexRow]) -> OutputResult<()>;

    fn write_edges(&mut self, rows: &[EdgeRow]) -> OutputResult<()>;

    fn write_switch_points(&mut self, rows: &[SwitchPointRow]) -> OutputResult<()>;

    fn write_parking_lots(&mut self, rows: &[ParkingLotRow]) -> OutputResult<()>;

    /// Debug dump of the coordinate table.  Backends without a coordinate
    /// sink ignore it.
    fn write_coords(&mut self, _rows: &[CoordRow]) -> OutputResult<()> {
        Ok(())
    }

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every vertex, edge, switch point and parking lot of `graph` once,
/// layer by layer, then call [`GraphWriter::finish`].
pub fn write_graph<W: GraphWriter>(writer: &mut W, graph: &MultimodalGraph) -> OutputResult<()> {
    for (mode, layer) in &graph.layers {
        let vertices: Vec<VertexRow> = layer.vertices.values().map(VertexRow::from).collect();
        let edges: Vec<EdgeRow> = layer.edges.values().map(EdgeRow::from).collect();
        writer.write_vertices(&vertices)?;
        writer.write_edges(&edges)?;
        log::info!("{mode}: wrote {} vertices, {} edges", vertices.len(), edges.len());
    }

    let switch_points: Vec<SwitchPointRow> = graph.switch_points.values().map(SwitchPointRow::from).collect();
    writer.write_switch_points(&switch_points)?;

    let lots: Vec<ParkingLotRow> = graph.parking_lots.iter().map(ParkingLotRow::from).collect();
    writer.write_parking_lots(&lots)?;
    log::info!("wrote {} switch points, {} parking lots", switch_points.len(), lots.len());

    writer.finish()
}

/// Dump the coordinate table in node id order.
pub fn write_coords<W: GraphWriter>(writer: &mut W, coords: &CoordinateTable) -> OutputResult<()> {
    let rows: Vec<CoordRow> = coords.sorted().into_iter().map(CoordRow::from).collect();
    writer.write_coords(&rows)?;
    log::info!("wrote {} coordinates", rows.len());
    Ok(())
}
