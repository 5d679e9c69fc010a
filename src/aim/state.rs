use serde::{Deserialize, Serialize};

use crate::geo::distance::{bearing_degrees, distance_yards};
use crate::{DomainError, GeoPoint};

/// Degrees of latitude between the ball and a freshly placed aim point.
pub const DEFAULT_TARGET_OFFSET_DEG: f64 = 0.0005;

/// Ball position and aim point.
///
/// The target only moves through [`AimState::re_aim`]; the origin only
/// through [`AimState::update_origin`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AimState {
    origin: GeoPoint,
    target: GeoPoint,
}

impl AimState {
    pub fn new(origin: GeoPoint, target: GeoPoint) -> Self {
        AimState { origin, target }
    }

    /// Aims a short way due north of `origin`.
    pub fn with_default_target(origin: GeoPoint) -> Result<Self, DomainError> {
        let target = GeoPoint::new(
            origin.latitude() + DEFAULT_TARGET_OFFSET_DEG,
            origin.longitude(),
        )?;
        Ok(AimState { origin, target })
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn target(&self) -> GeoPoint {
        self.target
    }

    pub fn re_aim(&mut self, target: GeoPoint) {
        self.target = target;
    }

    pub fn update_origin(&mut self, origin: GeoPoint) {
        self.origin = origin;
    }

    pub fn distance_yards(&self) -> f64 {
        distance_yards(&self.origin, &self.target)
    }

    pub fn bearing_degrees(&self) -> f64 {
        bearing_degrees(&self.origin, &self.target)
    }
}
