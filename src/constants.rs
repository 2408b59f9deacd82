//! # Constants and type definitions for koiviz
//!
//! This module centralizes the **numeric constants**, **visualization scale factors**, and
//! **common type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Angle conversions (degrees ↔ radians)
//! - Scale factors mapping raw catalog units into the bounded scene space
//! - Eccentricity ceiling and Kepler iteration budget
//! - The cyclic display palette for planets
//!
//! The mapper constants are the defaults of
//! [`MapperParams`](crate::orbit::params::MapperParams); every one of them can be overridden
//! through its builder.

// -------------------------------------------------------------------------------------------------
// Angles
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Full turn in degrees, upper (excluded) bound of the random ascending node
pub const FULL_TURN_DEG: f64 = 360.0;

// -------------------------------------------------------------------------------------------------
// Catalog → scene scaling
// -------------------------------------------------------------------------------------------------

/// Width of the band in which normalized semi-major axes are spread
pub const SPACING_SCALE: f64 = 2.0;

/// Smallest semi-major axis in the scene, keeps every orbit clear of the star
pub const MIN_OFFSET: f64 = 3.0;

/// Floor of the batch-wide semi-major axis normalization denominator
pub const MIN_SMA_DENOMINATOR: f64 = 1.0;

/// Planet radius (Earth radii) → scene units
pub const RADIUS_DIVISOR: f64 = 20.0;

/// Smallest body radius in scene units
pub const MIN_RADIUS: f64 = 0.03;

/// Numerator of the orbit rate: `rate = ORBIT_SPEED_SCALE / max(period, MIN_PERIOD)`
pub const ORBIT_SPEED_SCALE: f64 = 0.5;

/// Floor applied to the catalog period before dividing
pub const MIN_PERIOD: f64 = 1.0;

/// Hard ceiling on the rendered eccentricity
pub const MAX_ECCENTRICITY: f64 = 0.8;

/// Planet radius used when the catalog does not report one
pub const DEFAULT_PLANET_RADIUS: f64 = 1.0;

// -------------------------------------------------------------------------------------------------
// Kepler solver / orbit curve
// -------------------------------------------------------------------------------------------------

/// Fixed iteration budget of the eccentric anomaly relaxation
pub const KEPLER_ITERATIONS: usize = 5;

/// Number of segments used to sample the visual orbit ellipse
pub const ORBIT_CURVE_SEGMENTS: usize = 256;

// -------------------------------------------------------------------------------------------------
// Palette
// -------------------------------------------------------------------------------------------------

/// Cyclic display palette, indexed by row position modulo its length
pub const PLANET_PALETTE: [&str; 8] = [
    "#4fc3f7", // light blue
    "#81c784", // light green
    "#e57373", // red
    "#ffb74d", // orange
    "#ba68c8", // purple
    "#4db6ac", // teal
    "#f06292", // pink
    "#fff176", // yellow
];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Length in scene units
pub type SceneUnit = f64;
/// Simulation clock reading (seconds of animation time)
pub type SimTime = f64;
