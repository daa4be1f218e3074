//! Geographic coordinate type and great-circle distances.
//!
//! `GeoPoint` keeps double-precision longitude/latitude exactly as the map
//! decoder hands them over.  Edge lengths and speed factors downstream are
//! compared bit-for-bit across runs, so nothing here approximates.

use crate::{CoreError, CoreResult};

/// Earth radius used by every distance in the graph, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance to `other` in metres.
    #[inline]
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        distance(self.lon, self.lat, other.lon, other.lat)
    }

    /// Position on the unit sphere.  Chord length between two such points
    /// grows monotonically with great-circle distance.
    pub fn to_unit_vector(self) -> [f64; 3] {
        let lon = self.lon.to_radians();
        let lat = self.lat.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lon, self.lat)
    }
}

/// Haversine great-circle distance in metres between two positions given
/// in decimal degrees.
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let (lon1, lat1) = (lon1.to_radians(), lat1.to_radians());
    let (lon2, lat2) = (lon2.to_radians(), lat2.to_radians());

    let d_lon = lon2 - lon1;
    let d_lat = lat2 - lat1;
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c * 1000.0
}

/// Sum of distances over consecutive points.  Zero for fewer than two.
pub fn path_length(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].distance_m(w[1]))
        .sum()
}

/// Length in metres of a way given its ordered node references and a
/// coordinate lookup.
///
/// # Errors
///
/// [`CoreError::MissingCoordinate`] for the first reference `lookup` cannot
/// resolve.
pub fn way_length<F>(refs: &[i64], lookup: F) -> CoreResult<f64>
where
    F: Fn(i64) -> Option<GeoPoint>,
{
    let mut length = 0.0;
    let mut prev: Option<GeoPoint> = None;
    for &node in refs {
        let pos = lookup(node).ok_or(CoreError::MissingCoordinate(node))?;
        if let Some(p) = prev {
            length += p.distance_m(pos);
        }
        prev = Some(pos);
    }
    Ok(length)
}
