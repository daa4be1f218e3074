//! Unit tests for mmg-core primitives.

#[cfg(test)]
mod ids {
    use crate::ids::{Direction, compose_id, edge_id, switch_point_id, vertex_id};
    use crate::{CoreError, EdgeId, Mode, SwitchPointId, SwitchType, VertexId};

    #[test]
    fn compose_concatenates_decimal() {
        assert_eq!(compose_id(11, 42).unwrap(), 1142);
        assert_eq!(compose_id(11, 0).unwrap(), 110);
        assert_eq!(compose_id(17, 1000).unwrap(), 171000);
        assert_eq!(compose_id(91, 9).unwrap(), 919);
    }

    #[test]
    fn compose_rejects_negative() {
        assert!(matches!(compose_id(11, -5), Err(CoreError::IdOutOfRange { .. })));
        assert!(matches!(compose_id(-1, 5), Err(CoreError::IdOutOfRange { .. })));
    }

    #[test]
    fn compose_rejects_overflow() {
        // 19 digits of suffix leave no room for a two-digit prefix.
        let big = 1_000_000_000_000_000_000;
        assert!(compose_id(11, big).is_err());
        assert!(compose_id(11, i64::MAX).is_err());
    }

    #[test]
    fn vertex_ids_differ_per_mode() {
        let car  = vertex_id(Mode::PrivateCar, 123).unwrap();
        let foot = vertex_id(Mode::Foot, 123).unwrap();
        assert_eq!(car, VertexId(11123));
        assert_eq!(foot, VertexId(12123));
        assert_ne!(car, foot);
    }

    #[test]
    fn edge_id_layout() {
        let fwd = edge_id(Mode::Bicycle, 555, Direction::Forward).unwrap();
        let bwd = edge_id(Mode::Bicycle, 555, Direction::Backward).unwrap();
        assert_eq!(fwd, EdgeId(1755500));
        assert_eq!(bwd, EdgeId(1755501));
    }

    #[test]
    fn ids_are_deterministic() {
        let a = edge_id(Mode::PrivateCar, 987_654_321, Direction::Forward).unwrap();
        let b = edge_id(Mode::PrivateCar, 987_654_321, Direction::Forward).unwrap();
        assert_eq!(a, b);
        assert_eq!(vertex_id(Mode::Foot, 77).unwrap(), vertex_id(Mode::Foot, 77).unwrap());
    }

    #[test]
    fn switch_point_layout() {
        let id = switch_point_id(SwitchType::CarParking, 31_337).unwrap();
        assert_eq!(id, SwitchPointId(9_131_337));
    }

    #[test]
    fn display() {
        assert_eq!(VertexId(1142).to_string(), "VertexId(1142)");
        assert_eq!(EdgeId(7).get(), 7);
    }
}

#[cfg(test)]
mod mode {
    use crate::{Mode, SwitchType};

    #[test]
    fn stable_mode_ids() {
        assert_eq!(Mode::PrivateCar.id(), 11);
        assert_eq!(Mode::Foot.id(), 12);
        assert_eq!(Mode::Bicycle.id(), 17);
        assert_eq!(Mode::PublicTransportation.id(), 19);
    }

    #[test]
    fn stable_switch_type_ids() {
        assert_eq!(SwitchType::CarParking.id(), 91);
        assert_eq!(SwitchType::KissAndRide.id(), 98);
    }

    #[test]
    fn id_roundtrip() {
        for m in Mode::ALL {
            assert_eq!(Mode::from_id(m.id()).unwrap(), m);
        }
        for t in SwitchType::ALL {
            assert_eq!(SwitchType::from_id(t.id()).unwrap(), t);
        }
        assert!(Mode::from_id(10).is_err());
        assert!(SwitchType::from_id(99).is_err());
    }

    #[test]
    fn names_parse() {
        assert_eq!("private_car".parse::<Mode>().unwrap(), Mode::PrivateCar);
        assert_eq!("car_parking".parse::<SwitchType>().unwrap(), SwitchType::CarParking);
        assert!("car".parse::<Mode>().is_err());
        assert_eq!(Mode::Bicycle.to_string(), "bicycle");
    }

    #[test]
    fn street_modes() {
        assert!(Mode::STREET.iter().all(|m| m.is_street()));
        assert!(!Mode::Tram.is_street());
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::{distance, path_length, way_length};
    use crate::{CoreError, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(11.575, 48.137);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        // 6367 km radius → 2π·6367/360 km per degree.
        let d = distance(11.0, 48.0, 11.0, 49.0);
        let expected = 6_367_000.0 * 1f64.to_radians();
        assert!((d - expected).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(11.55, 48.13);
        let b = GeoPoint::new(11.60, 48.15);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = [
            GeoPoint::new(11.50, 48.10),
            GeoPoint::new(11.51, 48.10),
            GeoPoint::new(11.51, 48.11),
        ];
        let expected = pts[0].distance_m(pts[1]) + pts[1].distance_m(pts[2]);
        assert_eq!(path_length(&pts), expected);
        assert_eq!(path_length(&pts[..1]), 0.0);
    }

    #[test]
    fn way_length_resolves_refs() {
        let lookup = |id: i64| match id {
            1 => Some(GeoPoint::new(0.0, 0.0)),
            2 => Some(GeoPoint::new(0.0, 0.01)),
            3 => Some(GeoPoint::new(0.01, 0.01)),
            _ => None,
        };
        let len = way_length(&[1, 2, 3], lookup).unwrap();
        let expected = distance(0.0, 0.0, 0.0, 0.01) + distance(0.0, 0.01, 0.01, 0.01);
        assert_eq!(len, expected);
        assert!(len >= 0.0);
    }

    #[test]
    fn way_length_missing_ref() {
        let lookup = |id: i64| (id == 1).then(|| GeoPoint::new(0.0, 0.0));
        assert_eq!(way_length(&[1, 9], lookup), Err(CoreError::MissingCoordinate(9)));
    }

    #[test]
    fn unit_vector_is_normalized() {
        let v = GeoPoint::new(11.57, 48.14).to_unit_vector();
        let norm = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod record {
    use crate::{GeoPoint, NodeRecord, Tags, WayRecord};

    #[test]
    fn tag_lookup() {
        let mut tags = Tags::new();
        tags.insert("amenity".into(), "parking".into());
        let n = NodeRecord { osm_id: 1, tags, pos: GeoPoint::new(0.0, 0.0) };
        assert_eq!(n.tag("amenity"), Some("parking"));
        assert_eq!(n.tag("name"), None);
    }

    #[test]
    fn endpoints() {
        let w = WayRecord { osm_id: 5, tags: Tags::new(), refs: vec![3, 4, 9] };
        assert_eq!(w.endpoints(), Some((3, 9)));
        let empty = WayRecord { osm_id: 6, tags: Tags::new(), refs: vec![] };
        assert_eq!(empty.endpoints(), None);
    }
}
