pub mod state;
pub mod view;

pub use state::{AimState, DEFAULT_TARGET_OFFSET_DEG};
pub use view::{yards_per_pixel, zoom_for_distance};

use crate::GeoPoint;

/// Fallback ball position used before a live fix arrives.
pub fn default_origin() -> GeoPoint {
    GeoPoint {
        latitude: 36.5662,
        longitude: -121.9465,
    }
}
