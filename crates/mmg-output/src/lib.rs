//! `mmg-output`: interchange file writers for the multimodal graph builder.
//!
//! | File                | Columns                                                                                             |
//! |---------------------|-----------------------------------------------------------------------------------------------------|
//! | `vertices.csv`      | `outdegree,vertex_id,osm_id,mode_id,lon,lat`                                                        |
//! | `edges.csv`         | `length,speed_factor,mode_id,from_id,to_id,edge_id,osm_id`                                          |
//! | `switch_points.csv` | `cost,is_available,from_mode_id,to_mode_id,type_id,from_vertex_id,to_vertex_id,switch_point_id,ref_poi_id` |
//! | `car_parkings.csv`  | `osm_id,name,lon,lat`                                                                               |
//! | `coords.csv`        | `osm_id,lon,lat` (only with [`CsvGraphWriter::with_coords`])                                        |
//!
//! Column order and header rows are fixed; row order is not.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mmg_output::{CsvGraphWriter, write_graph};
//!
//! let mut writer = CsvGraphWriter::new(Path::new("./out"))?;
//! write_graph(&mut writer, &graph)?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvGraphWriter;
pub use error::{OutputError, OutputResult};
pub use row::{CoordRow, EdgeRow, ParkingLotRow, SwitchPointRow, VertexRow};
pub use writer::{GraphWriter, write_coords, write_graph};
