//! Way classification into mode layers.
//!
//! A way's `highway` value is looked up in three static tables.  Foot
//! access additionally inherits every bicycle tag, since shared-use paths
//! are open to pedestrians.  Ways without a `highway` tag belong to no
//! layer.

use mmg_core::{Mode, WayRecord};

pub const CAR_WAY_TAGS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "minor",
    "residential",
    "service",
];

pub const BICYCLE_WAY_TAGS: &[&str] = &[
    "primary",
    "secondary",
    "tertiary",
    "unclassified",
    "minor",
    "cycleway",
    "residential",
    "track",
    "service",
];

pub const FOOT_WAY_TAGS: &[&str] = &["footway", "steps"];

/// The street layers a way qualifies for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeSet {
    pub car:     bool,
    pub bicycle: bool,
    pub foot:    bool,
}

impl ModeSet {
    pub fn is_empty(self) -> bool {
        !(self.car || self.bicycle || self.foot)
    }

    pub fn contains(self, mode: Mode) -> bool {
        match mode {
            Mode::PrivateCar => self.car,
            Mode::Bicycle    => self.bicycle,
            Mode::Foot       => self.foot,
            _                => false,
        }
    }

    /// Member modes in [`Mode::STREET`] order.
    pub fn iter(self) -> impl Iterator<Item = Mode> {
        Mode::STREET.into_iter().filter(move |&m| self.contains(m))
    }
}

/// Classify a `highway` tag value.
pub fn classify_highway(highway: &str) -> ModeSet {
    let bicycle = BICYCLE_WAY_TAGS.contains(&highway);
    ModeSet {
        car:  CAR_WAY_TAGS.contains(&highway),
        bicycle,
        foot: bicycle || FOOT_WAY_TAGS.contains(&highway),
    }
}

/// Classify a way by its tags.  `None` when it has no `highway` tag at all.
pub fn classify_way(way: &WayRecord) -> Option<ModeSet> {
    way.tag("highway").map(classify_highway)
}
