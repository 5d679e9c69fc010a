use log::trace;
use serde::{Deserialize, Serialize};

use crate::dispersion::{DEGREES_PER_YARD, MIN_POINT_COUNT};
use crate::{DomainError, GeoPoint};

/// Below this cosine the longitude scale is treated as undefined.
const POLE_COS_EPSILON: f64 = 1e-12;

/// Closed ring approximating a dispersion contour at one sigma level.
///
/// `vertices` holds `point_count + 1` entries; the last is a copy of the first.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DispersionPolygon {
    /// Bias-corrected center the ring is drawn around.
    pub center: GeoPoint,
    pub sigma: f64,
    pub vertices: Vec<GeoPoint>,
}

impl DispersionPolygon {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => self.vertices.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Mean vertex position, ignoring the closing duplicate.
    ///
    /// Longitudes are averaged as offsets from `center`, so rings straddling
    /// the antimeridian stay centered on it.
    pub fn centroid(&self) -> Option<GeoPoint> {
        let open = if self.is_closed() {
            &self.vertices[..self.vertices.len() - 1]
        } else {
            &self.vertices[..]
        };
        if open.is_empty() {
            return None;
        }
        let n = open.len() as f64;
        let lat = open.iter().map(|p| p.latitude()).sum::<f64>() / n;
        let lon_offset = open
            .iter()
            .map(|p| longitude_delta(self.center.longitude(), p.longitude()))
            .sum::<f64>()
            / n;
        GeoPoint::new(lat, wrap_longitude(self.center.longitude() + lon_offset)).ok()
    }
}

/// Builds an axis-aligned dispersion ellipse around `center`.
///
/// The center is first shifted east by `lateral_bias_yards` (positive = right
/// of target). Carry spread runs north/south, lateral spread east/west, both
/// scaled by `sigma_multiplier` on a locally flat tangent plane.
pub fn dispersion_ellipse(
    center: GeoPoint,
    lateral_bias_yards: f64,
    carry_std_dev: f64,
    lateral_std_dev: f64,
    sigma_multiplier: f64,
    point_count: usize,
) -> Result<DispersionPolygon, DomainError> {
    if point_count < MIN_POINT_COUNT {
        return Err(DomainError::TooFewPoints {
            got: point_count,
            min: MIN_POINT_COUNT,
        });
    }
    check_finite("lateral bias", lateral_bias_yards)?;
    check_non_negative("carry standard deviation", carry_std_dev)?;
    check_non_negative("lateral standard deviation", lateral_std_dev)?;
    if !sigma_multiplier.is_finite() || sigma_multiplier <= 0.0 {
        return Err(DomainError::InvalidParameter {
            name: "sigma multiplier",
            value: sigma_multiplier,
        });
    }

    let cos_lat = center.latitude().to_radians().cos();
    if cos_lat.abs() <= POLE_COS_EPSILON {
        return Err(DomainError::PoleSingularity(center.latitude()));
    }

    let lat_scale = DEGREES_PER_YARD;
    let lon_scale = DEGREES_PER_YARD / cos_lat;

    let biased = GeoPoint::new(
        center.latitude(),
        wrap_longitude(center.longitude() + lateral_bias_yards * lon_scale),
    )?;

    let north_radius = carry_std_dev * sigma_multiplier * lat_scale;
    let east_radius = lateral_std_dev * sigma_multiplier * lon_scale;

    let mut vertices = Vec::with_capacity(point_count + 1);
    for i in 0..point_count {
        let angle = std::f64::consts::TAU * i as f64 / point_count as f64;
        let lat = biased.latitude() + angle.sin() * north_radius;
        let lon = biased.longitude() + angle.cos() * east_radius;
        vertices.push(GeoPoint::new(lat, wrap_longitude(lon))?);
    }
    let first = vertices[0];
    vertices.push(first);

    trace!(
        "ellipse at {} sigma={} carry_sd={} lateral_sd={} -> {} vertices",
        biased,
        sigma_multiplier,
        carry_std_dev,
        lateral_std_dev,
        vertices.len()
    );

    Ok(DispersionPolygon {
        center: biased,
        sigma: sigma_multiplier,
        vertices,
    })
}

fn check_finite(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::InvalidParameter { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), DomainError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(DomainError::InvalidParameter { name, value });
    }
    Ok(())
}

/// Wraps a longitude into [-180, 180] without clamping.
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Signed east-west difference `to - from`, unwrapped into (-180, 180].
fn longitude_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}
