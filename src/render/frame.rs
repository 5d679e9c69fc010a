use log::debug;
use serde::{Deserialize, Serialize};

use crate::aim::{zoom_for_distance, AimState};
use crate::clubs::ClubProfile;
use crate::dispersion::{DispersionPolygon, DEFAULT_POINT_COUNT, STANDARD_SIGMA_LEVELS};
use crate::{DomainError, GeoPoint};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RenderSettings {
    /// Contours to draw, in painting order.
    pub sigma_levels: Vec<f64>,
    pub point_count: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            sigma_levels: STANDARD_SIGMA_LEVELS.to_vec(),
            point_count: DEFAULT_POINT_COUNT,
        }
    }
}

/// Everything a renderer needs for one redraw.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RenderFrame {
    pub origin: GeoPoint,
    pub target: GeoPoint,
    pub club: String,
    pub distance_yards: f64,
    pub bearing_degrees: f64,
    pub zoom: u8,
    pub contours: Vec<DispersionPolygon>,
}

impl RenderFrame {
    pub fn compute(
        aim: &AimState,
        club: &ClubProfile,
        settings: &RenderSettings,
    ) -> Result<Self, DomainError> {
        let distance_yards = aim.distance_yards();
        let contours = settings
            .sigma_levels
            .iter()
            .map(|&sigma| club.dispersion(aim.target(), sigma, settings.point_count))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "frame for {}: {:.1} yd to {} with {} contours",
            club.name,
            distance_yards,
            aim.target(),
            contours.len()
        );

        Ok(RenderFrame {
            origin: aim.origin(),
            target: aim.target(),
            club: club.name.clone(),
            distance_yards,
            bearing_degrees: aim.bearing_degrees(),
            zoom: zoom_for_distance(distance_yards),
            contours,
        })
    }
}
