//! Integration tests for mmg-output.

#[cfg(test)]
mod helpers {
    use mmg_core::{CoordRecord, GeoPoint, NodeRecord, Tags, WayRecord};
    use mmg_graph::{Ingest, MultimodalGraph, Pipeline};
    use tempfile::TempDir;

    pub fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect()
    }

    pub fn ingest() -> Ingest {
        let mut ingest = Ingest::new();
        ingest.coords([
            CoordRecord { osm_id: 1, pos: GeoPoint::new(11.50, 48.10) },
            CoordRecord { osm_id: 2, pos: GeoPoint::new(11.51, 48.10) },
            CoordRecord { osm_id: 3, pos: GeoPoint::new(11.51, 48.11) },
        ]);
        ingest.nodes([NodeRecord {
            osm_id: 42,
            tags:   tags(&[("amenity", "parking"), ("name", "P+R, Ost")]),
            pos:    GeoPoint::new(11.501, 48.10),
        }]);
        ingest.ways([
            WayRecord { osm_id: 7, tags: tags(&[("highway", "residential")]), refs: vec![1, 2] },
            WayRecord { osm_id: 8, tags: tags(&[("highway", "footway")]), refs: vec![2, 3] },
        ]);
        ingest
    }

    /// car: 2 vertices / 2 edges, foot: 3 / 4, bicycle: 2 / 2, one switch point.
    pub fn graph() -> MultimodalGraph {
        Pipeline::new().parallel(false).run(&ingest()).unwrap().0
    }

    pub fn read(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }
}

#[cfg(test)]
mod csv_tests {
    use mmg_core::{EdgeId, GeoPoint, Mode, SwitchPointId, SwitchType, VertexId};
    use mmg_graph::{CoordinateTable, Edge, SwitchPoint, Vertex};

    use crate::csv::CsvGraphWriter;
    use crate::row::{EdgeRow, SwitchPointRow, VertexRow};
    use crate::writer::{GraphWriter, write_coords, write_graph};
    use super::helpers::{graph, read, tmp};

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvGraphWriter::new(dir.path()).unwrap();
        for name in ["vertices.csv", "edges.csv", "switch_points.csv", "car_parkings.csv"] {
            assert!(dir.path().join(name).exists(), "{name}");
        }
        assert!(!dir.path().join("coords.csv").exists());
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("a").join("b");
        let mut w = CsvGraphWriter::new(&nested).unwrap();
        w.finish().unwrap();
        assert!(nested.join("edges.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (h, rows) = read(&dir.path().join("vertices.csv"));
        assert_eq!(h, ["outdegree", "vertex_id", "osm_id", "mode_id", "lon", "lat"]);
        assert!(rows.is_empty());

        let (h, _) = read(&dir.path().join("edges.csv"));
        assert_eq!(h, ["length", "speed_factor", "mode_id", "from_id", "to_id", "edge_id", "osm_id"]);

        let (h, _) = read(&dir.path().join("switch_points.csv"));
        assert_eq!(h, [
            "cost",
            "is_available",
            "from_mode_id",
            "to_mode_id",
            "type_id",
            "from_vertex_id",
            "to_vertex_id",
            "switch_point_id",
            "ref_poi_id",
        ]);

        let (h, _) = read(&dir.path().join("car_parkings.csv"));
        assert_eq!(h, ["osm_id", "name", "lon", "lat"]);
    }

    #[test]
    fn vertex_columns_in_order() {
        let dir = tmp();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        let v = Vertex {
            vertex_id:  VertexId(1142),
            mode:       Mode::PrivateCar,
            osm_id:     42,
            pos:        GeoPoint::new(11.5, 48.25),
            out_degree: 2,
            outgoing:   vec![EdgeId(11700), EdgeId(11701)],
        };
        w.write_vertices(&[VertexRow::from(&v)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("vertices.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["2", "1142", "42", "11", "11.5", "48.25"]);
    }

    #[test]
    fn edge_columns_in_order() {
        let dir = tmp();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        let e = Edge {
            edge_id:      EdgeId(12700),
            from_id:      VertexId(121),
            to_id:        VertexId(122),
            osm_id:       7,
            length_m:     250.5,
            speed_factor: 0.25,
            mode:         Mode::Foot,
        };
        w.write_edges(&[EdgeRow::from(&e)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("edges.csv"));
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["250.5", "0.25", "12", "121", "122", "12700", "7"]);
    }

    #[test]
    fn switch_point_availability_literal() {
        let dir = tmp();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        let sp = SwitchPoint {
            switch_point_id: SwitchPointId(9142),
            cost:            3.0,
            is_available:    true,
            from_mode:       Mode::PrivateCar,
            to_mode:         Mode::Foot,
            switch_type:     SwitchType::CarParking,
            from_vertex_id:  VertexId(111),
            to_vertex_id:    VertexId(121),
            ref_poi_id:      42,
        };
        let closed = SwitchPoint { is_available: false, ..sp.clone() };
        w.write_switch_points(&[SwitchPointRow::from(&sp), SwitchPointRow::from(&closed)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir.path().join("switch_points.csv"));
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "t", "11", "12", "91", "111", "121", "9142", "42"]);
        assert_eq!(&rows[1][1], "f");
    }

    #[test]
    fn whole_graph_written_once() {
        let dir = tmp();
        let graph = graph();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        write_graph(&mut w, &graph).unwrap();

        let (_, vertices) = read(&dir.path().join("vertices.csv"));
        let (_, edges) = read(&dir.path().join("edges.csv"));
        let (_, switch_points) = read(&dir.path().join("switch_points.csv"));
        let (_, lots) = read(&dir.path().join("car_parkings.csv"));
        assert_eq!(vertices.len(), graph.vertex_count());
        assert_eq!(edges.len(), graph.edge_count());
        assert_eq!(switch_points.len(), 1);
        assert_eq!(&switch_points[0][7], "9142");
        assert_eq!(lots.len(), 1);
        assert_eq!(&lots[0][1], "P+R; Ost");

        let mut ids: Vec<&str> = edges.iter().map(|r| r.get(5).unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), edges.len());
    }

    #[test]
    fn coords_only_when_enabled() {
        let dir = tmp();
        let mut coords = CoordinateTable::new();
        coords.insert(2, GeoPoint::new(1.0, 2.0));
        coords.insert(1, GeoPoint::new(3.0, 4.0));

        let mut w = CsvGraphWriter::with_coords(dir.path()).unwrap();
        write_coords(&mut w, &coords).unwrap();
        w.finish().unwrap();

        let (h, rows) = read(&dir.path().join("coords.csv"));
        assert_eq!(h, ["osm_id", "lon", "lat"]);
        assert_eq!(rows.iter().map(|r| r[0].to_owned()).collect::<Vec<_>>(), ["1", "2"]);
    }

    #[test]
    fn coords_ignored_without_sink() {
        let dir = tmp();
        let mut coords = CoordinateTable::new();
        coords.insert(1, GeoPoint::new(3.0, 4.0));
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        write_coords(&mut w, &coords).unwrap();
        assert!(!dir.path().join("coords.csv").exists());
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvGraphWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
