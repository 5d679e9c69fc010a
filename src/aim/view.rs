use crate::geo::YARDS_PER_METER;

/// Ground resolution of a 256px Web-Mercator tile at zoom 0 on the equator.
const METERS_PER_PIXEL_Z0: f64 = 156_543.033_92;

/// Distance below which the map dives in close.
pub const CLOSE_RANGE_YARDS: f64 = 220.0;

pub const CLOSE_ZOOM: u8 = 19;
pub const FAR_ZOOM: u8 = 17;

/// Pulls back for long shots, dives in for short ones.
pub fn zoom_for_distance(yards: f64) -> u8 {
    if yards < CLOSE_RANGE_YARDS {
        CLOSE_ZOOM
    } else {
        FAR_ZOOM
    }
}

pub fn yards_per_pixel(zoom: f64, latitude: f64) -> f64 {
    METERS_PER_PIXEL_Z0 * latitude.to_radians().cos() / 2f64.powf(zoom) * YARDS_PER_METER
}
