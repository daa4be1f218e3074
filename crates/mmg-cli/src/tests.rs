//! Unit tests for configuration and flag handling.

#[cfg(test)]
mod config {
    use std::path::{Path, PathBuf};

    use mmg_core::{Mode, SwitchType};
    use mmg_graph::{LocatorKind, SwitchRule};

    use crate::config::{BuildConfig, ConfigError};

    #[test]
    fn defaults_build_every_street_layer() {
        let c = BuildConfig::default();
        assert_eq!(c.modes, [Mode::PrivateCar, Mode::Foot, Mode::Bicycle]);
        assert_eq!(c.locator, LocatorKind::BruteForce);
        assert_eq!(c.switch_rules, [SwitchRule::car_parking()]);
        assert!(c.parallelize);
        assert!(!c.write_coords);
    }

    #[test]
    fn empty_document_is_default() {
        let c: BuildConfig = toml::from_str("").unwrap();
        assert_eq!(c, BuildConfig::default());
    }

    #[test]
    fn full_document() {
        let c: BuildConfig = toml::from_str(
            r#"
            output_directory = "graphs/munich"
            modes            = ["foot", "private_car"]
            parallelize      = false
            locator          = "rtree"
            write_coords     = true

            [[switch_rules]]
            switch_type = "car_parking"
            from_mode   = "private_car"
            to_mode     = "foot"
            cost        = 5.0
            "#,
        )
        .unwrap();
        assert_eq!(c.output_directory, PathBuf::from("graphs/munich"));
        assert_eq!(c.modes, [Mode::Foot, Mode::PrivateCar]);
        assert!(!c.parallelize);
        assert_eq!(c.locator, LocatorKind::RTree);
        assert!(c.write_coords);
        assert_eq!(c.switch_rules.len(), 1);
        assert_eq!(c.switch_rules[0].switch_type, SwitchType::CarParking);
        assert_eq!(c.switch_rules[0].cost, 5.0);
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(toml::from_str::<BuildConfig>(r#"modes = ["hovercraft"]"#).is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let c = BuildConfig { locator: LocatorKind::RTree, ..Default::default() };
        let s = toml::to_string(&c).unwrap();
        assert!(s.contains(r#"locator = "rtree""#));
        assert_eq!(toml::from_str::<BuildConfig>(&s).unwrap(), c);
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.toml");
        std::fs::write(&path, "write_coords = true\n").unwrap();
        let c = BuildConfig::try_from(path.as_path()).unwrap();
        assert!(c.write_coords);
    }

    #[test]
    fn empty_mode_list_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.toml");
        std::fs::write(&path, "modes = []\n").unwrap();
        assert!(matches!(BuildConfig::try_from(path.as_path()), Err(ConfigError::NoModes)));
    }

    #[test]
    fn duplicate_switch_rules_rejected() {
        let c: BuildConfig = toml::from_str(
            r#"
            [[switch_rules]]
            switch_type = "car_parking"
            from_mode   = "private_car"
            to_mode     = "foot"
            cost        = 3.0

            [[switch_rules]]
            switch_type = "car_parking"
            from_mode   = "foot"
            to_mode     = "private_car"
            cost        = 1.0
            "#,
        )
        .unwrap();
        assert!(matches!(
            c.validate(),
            Err(ConfigError::DuplicateSwitchRule(SwitchType::CarParking))
        ));
    }

    #[test]
    fn non_toml_rejected() {
        let err = BuildConfig::try_from(Path::new("build.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn missing_file_reported() {
        let err = BuildConfig::try_from(Path::new("/nonexistent/build.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}

#[cfg(test)]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;
    use mmg_core::Mode;
    use mmg_graph::LocatorKind;

    use crate::Cli;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "mmg",
            "city.osm.pbf",
            "--output-directory",
            "elsewhere",
            "--modes",
            "foot,bicycle",
            "--locator",
            "rtree",
            "--sequential",
            "--write-coords",
        ])
        .unwrap();
        assert_eq!(cli.pbf, PathBuf::from("city.osm.pbf"));

        let c = cli.build_config().unwrap();
        assert_eq!(c.output_directory, PathBuf::from("elsewhere"));
        assert_eq!(c.modes, [Mode::Foot, Mode::Bicycle]);
        assert_eq!(c.locator, LocatorKind::RTree);
        assert!(!c.parallelize);
        assert!(c.write_coords);
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.toml");
        std::fs::write(&path, "locator = \"rtree\"\nmodes = [\"foot\"]\n").unwrap();

        let cli = Cli::try_parse_from([
            "mmg",
            "city.osm.pbf",
            "--config",
            path.to_str().unwrap(),
            "--locator",
            "brute_force",
        ])
        .unwrap();
        let c = cli.build_config().unwrap();
        assert_eq!(c.locator, LocatorKind::BruteForce);
        assert_eq!(c.modes, [Mode::Foot]);
    }

    #[test]
    fn unknown_locator_rejected() {
        assert!(Cli::try_parse_from(["mmg", "x.pbf", "--locator", "kd"]).is_err());
    }

    #[test]
    fn input_file_required() {
        assert!(Cli::try_parse_from(["mmg"]).is_err());
    }
}
