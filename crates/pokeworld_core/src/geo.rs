use serde::{Deserialize, Serialize};

/// Planar approximation: one degree of latitude or longitude is ~111 km.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }
}

/// Distance in whole metres for an offset given in degrees.
///
/// Not geodesic: longitude compression is ignored on purpose so nearby
/// markers get the same distances the map shell shows.
pub fn planar_distance_meters(d_lat: f64, d_lng: f64) -> u32 {
    ((d_lat * d_lat + d_lng * d_lng).sqrt() * METERS_PER_DEGREE).round() as u32
}
