pub mod aim;
pub mod clubs;
pub mod config;
pub mod data;
pub mod dispersion;
pub mod geo;
pub mod render;

use serde::{Deserialize, Serialize};

pub use geo::DomainError;

/// A validated geographic coordinate in degrees.
///
/// Latitude lies in [-90, 90] and longitude in [-180, 180]; both are finite.
/// Deserialization runs the same checks as [`GeoPoint::new`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = DomainError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::LongitudeOutOfRange(longitude));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn distance_yards(&self, other: &GeoPoint) -> f64 {
        geo::distance::distance_yards(self, other)
    }

    pub fn bearing_degrees(&self, other: &GeoPoint) -> f64 {
        geo::distance::bearing_degrees(self, other)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(DomainError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.01),
            Err(DomainError::LongitudeOutOfRange(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn deserialization_validates() {
        let ok: GeoPoint =
            serde_json::from_str(r#"{"latitude": 36.5651, "longitude": -121.9472}"#).unwrap();
        assert_eq!(ok.latitude(), 36.5651);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 120.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }
}
