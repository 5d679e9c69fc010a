pub mod ellipse;

pub use ellipse::{dispersion_ellipse, DispersionPolygon};

/// Empirical degrees-per-yard scale at the equator. An approximation, not a
/// projection.
pub const DEGREES_PER_YARD: f64 = 9e-6;

/// One vertex every 20 degrees.
pub const DEFAULT_POINT_COUNT: usize = 18;

pub const MIN_POINT_COUNT: usize = 8;

/// Sigma multipliers drawn for a club, outer contour first.
pub const STANDARD_SIGMA_LEVELS: [f64; 2] = [2.0, 1.0];
