//! OSM PBF decoding, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use mmg_graph::{Pipeline, osm::read_pbf};
//!
//! let ingest = read_pbf(Path::new("munich.osm.pbf"))?;
//! let (graph, summary) = Pipeline::new().run(&ingest)?;
//! ```
//!
//! # What is read
//!
//! Every node position goes into the coordinate table; nodes with at least
//! one tag are also offered as tagged nodes (parking lots).  Every way is
//! offered for classification.  Relations are only counted.
//!
//! # Memory note
//!
//! All node positions are held in memory for the whole run, since ways
//! reference nodes by id and may appear anywhere after them.  For a city
//! extract that is a few million entries.

use std::path::Path;

use osmpbf::{Element, ElementReader};

use mmg_core::{CoordRecord, GeoPoint, NodeRecord, Tags, WayRecord};

use crate::ingest::Ingest;
use crate::GraphError;

/// Decode a PBF file into an [`Ingest`].
///
/// # Errors
///
/// [`GraphError::Osm`] on open or decode failure.
pub fn read_pbf(path: &Path) -> Result<Ingest, GraphError> {
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;
    let mut ingest = Ingest::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let pos = GeoPoint::new(n.lon(), n.lat());
                offer_node(&mut ingest, n.id(), pos, n.tags());
            }
            Element::DenseNode(n) => {
                let pos = GeoPoint::new(n.lon(), n.lat());
                offer_node(&mut ingest, n.id(), pos, n.tags());
            }
            Element::Way(w) => {
                ingest.way(WayRecord {
                    osm_id: w.id(),
                    tags:   collect_tags(w.tags()),
                    refs:   w.refs().collect(),
                });
            }
            Element::Relation(_) => ingest.relation(),
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    log::info!(
        "read {}: {} coords, {} nodes, {} highway ways, {} relations",
        path.display(),
        ingest.stats.coords,
        ingest.stats.nodes,
        ingest.stats.highway_ways,
        ingest.stats.relations,
    );
    Ok(ingest)
}

fn offer_node<'t>(ingest: &mut Ingest, osm_id: i64, pos: GeoPoint, tags: impl Iterator<Item = (&'t str, &'t str)>) {
    ingest.coord(CoordRecord { osm_id, pos });
    let tags = collect_tags(tags);
    if !tags.is_empty() {
        ingest.node(NodeRecord { osm_id, tags, pos });
    }
}

fn collect_tags<'t>(tags: impl Iterator<Item = (&'t str, &'t str)>) -> Tags {
    tags.map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
}
