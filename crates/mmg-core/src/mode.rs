//! Travel mode and switch type enumerations shared with downstream consumers.
//!
//! The numeric ids are part of the output contract: the path-search engine
//! reads them straight out of the CSV files, so they must never be
//! renumbered.  Only the street modes (`PrivateCar`, `Foot`, `Bicycle`)
//! have graphs built from map ways today; the rest are reserved.

use std::str::FromStr;

use crate::{CoreError, CoreResult};

// ── Mode ──────────────────────────────────────────────────────────────────────

/// A travel modality with a fixed numeric identifier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    PrivateCar,
    Foot,
    Underground,
    Suburban,
    Tram,
    Bus,
    Bicycle,
    Taxi,
    PublicTransportation,
}

impl Mode {
    /// Every mode in id order.
    pub const ALL: [Mode; 9] = [
        Mode::PrivateCar,
        Mode::Foot,
        Mode::Underground,
        Mode::Suburban,
        Mode::Tram,
        Mode::Bus,
        Mode::Bicycle,
        Mode::Taxi,
        Mode::PublicTransportation,
    ];

    /// Modes whose layer is built from street ways.
    pub const STREET: [Mode; 3] = [Mode::PrivateCar, Mode::Foot, Mode::Bicycle];

    /// Stable numeric id written to every output file.
    pub fn id(self) -> i64 {
        match self {
            Mode::PrivateCar           => 11,
            Mode::Foot                 => 12,
            Mode::Underground          => 13,
            Mode::Suburban             => 14,
            Mode::Tram                 => 15,
            Mode::Bus                  => 16,
            Mode::Bicycle              => 17,
            Mode::Taxi                 => 18,
            Mode::PublicTransportation => 19,
        }
    }

    pub fn from_id(id: i64) -> CoreResult<Mode> {
        Mode::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or(CoreError::UnknownMode(id))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::PrivateCar           => "private_car",
            Mode::Foot                 => "foot",
            Mode::Underground          => "underground",
            Mode::Suburban             => "suburban",
            Mode::Tram                 => "tram",
            Mode::Bus                  => "bus",
            Mode::Bicycle              => "bicycle",
            Mode::Taxi                 => "taxi",
            Mode::PublicTransportation => "public_transportation",
        }
    }

    /// `true` for the modes built from street ways.
    #[inline]
    pub fn is_street(self) -> bool {
        matches!(self, Mode::PrivateCar | Mode::Foot | Mode::Bicycle)
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Mode> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| CoreError::Parse(format!("unknown mode {s:?}")))
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SwitchType ────────────────────────────────────────────────────────────────

/// Classification of a transfer between two mode layers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SwitchType {
    CarParking,
    GeoConnection,
    ParkAndRide,
    UndergroundStation,
    SuburbanStation,
    TramStation,
    BusStation,
    KissAndRide,
}

impl SwitchType {
    pub const ALL: [SwitchType; 8] = [
        SwitchType::CarParking,
        SwitchType::GeoConnection,
        SwitchType::ParkAndRide,
        SwitchType::UndergroundStation,
        SwitchType::SuburbanStation,
        SwitchType::TramStation,
        SwitchType::BusStation,
        SwitchType::KissAndRide,
    ];

    pub fn id(self) -> i64 {
        match self {
            SwitchType::CarParking         => 91,
            SwitchType::GeoConnection      => 92,
            SwitchType::ParkAndRide        => 93,
            SwitchType::UndergroundStation => 94,
            SwitchType::SuburbanStation    => 95,
            SwitchType::TramStation        => 96,
            SwitchType::BusStation         => 97,
            SwitchType::KissAndRide        => 98,
        }
    }

    pub fn from_id(id: i64) -> CoreResult<SwitchType> {
        SwitchType::ALL
            .into_iter()
            .find(|t| t.id() == id)
            .ok_or(CoreError::UnknownSwitchType(id))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwitchType::CarParking         => "car_parking",
            SwitchType::GeoConnection      => "geo_connection",
            SwitchType::ParkAndRide        => "park_and_ride",
            SwitchType::UndergroundStation => "underground_station",
            SwitchType::SuburbanStation    => "suburban_station",
            SwitchType::TramStation        => "tram_station",
            SwitchType::BusStation         => "bus_station",
            SwitchType::KissAndRide        => "kiss_and_ride",
        }
    }
}

impl FromStr for SwitchType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<SwitchType> {
        SwitchType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Parse(format!("unknown switch type {s:?}")))
    }
}

impl std::fmt::Display for SwitchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
