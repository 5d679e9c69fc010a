use crate::geo::{EARTH_RADIUS_M, YARDS_PER_METER};
use crate::GeoPoint;

/// Great-circle distance in meters on a spherical Earth (haversine).
pub fn haversine_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = (b.latitude() - a.latitude()).to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt()) * EARTH_RADIUS_M
}

pub fn meters_to_yards(meters: f64) -> f64 {
    meters * YARDS_PER_METER
}

pub fn distance_yards(a: &GeoPoint, b: &GeoPoint) -> f64 {
    meters_to_yards(haversine_meters(a, b))
}

/// Initial great-circle bearing from `a` to `b`, clockwise from true north,
/// normalized to [0, 360).
///
/// The bearing between identical points is indeterminate; it is reported as 0.
pub fn bearing_degrees(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if a == b {
        return 0.0;
    }

    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Folds any angle in degrees into [0, 360).
pub fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 || wrapped == 0.0 {
        0.0
    } else {
        wrapped
    }
}
