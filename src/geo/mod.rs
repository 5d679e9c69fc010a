pub mod distance;

use thiserror::Error;

pub use distance::{bearing_degrees, distance_yards, haversine_meters, meters_to_yards};

/// Mean Earth radius of the spherical model, in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Yards per meter.
pub const YARDS_PER_METER: f64 = 1.09361;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("longitude scale is undefined at latitude {0} (pole singularity)")]
    PoleSingularity(f64),
    #[error("ring needs at least {min} points, got {got}")]
    TooFewPoints { got: usize, min: usize },
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
