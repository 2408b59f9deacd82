//! # Renderable orbital elements
//!
//! [`OrbitalElements`] is the per-body output of the [`OrbitMapper`](crate::orbit::mapper::OrbitMapper):
//! a bounded, scene-scaled version of the classical Keplerian set plus the display
//! attributes needed to draw the body.
//!
//! ## Units
//!
//! - Lengths: **scene units** (the star sits at the origin, innermost orbit at `a = 3`)
//! - Angles: **degrees** (converted to radians only when the orbit frame is built)
//! - Rate: **turns per clock second**, so one revolution takes `1 / orbit_angular_rate`
//!
//! ## Invariants
//!
//! - `0 ≤ eccentricity < 1`: orbits are always closed ellipses.
//! - `semi_major_axis > 0`.
//!
//! Both hold for every value produced by the mapper with validated
//! [`MapperParams`](crate::orbit::params::MapperParams). Elements are immutable once mapped;
//! a new import replaces the whole list.
use std::fmt;

use serde::Serialize;

use crate::constants::{Degree, SceneUnit};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalElements {
    pub semi_major_axis: SceneUnit,
    pub eccentricity: f64,
    pub inclination: Degree,
    pub longitude_of_ascending_node: Degree,
    pub argument_of_periapsis: Degree,
    pub orbit_angular_rate: f64,
    pub body_radius: SceneUnit,
    pub color: String,
}

impl OrbitalElements {
    /// Clock span after which the mean anomaly wraps once.
    ///
    /// The mean anomaly is `t · rate · 2π`, so a full turn takes `1 / rate`.
    /// A body with a zero rate never moves and has an infinite period.
    pub fn period(&self) -> f64 {
        1.0 / self.orbit_angular_rate
    }

    /// Semi-minor axis `b = a·√(1−e²)`.
    pub fn semi_minor_axis(&self) -> SceneUnit {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Closest distance to the focus, `a(1−e)`.
    pub fn periapsis_distance(&self) -> SceneUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance to the focus, `a(1+e)`.
    pub fn apoapsis_distance(&self) -> SceneUnit {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbital Elements ({})", self.color)?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6}",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6}°",
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6}°",
            self.longitude_of_ascending_node
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6}°",
            self.argument_of_periapsis
        )?;
        writeln!(
            f,
            "  n   (angular rate)          = {:.6} turn/s",
            self.orbit_angular_rate
        )?;
        writeln!(
            f,
            "  R   (body radius)           = {:.6}",
            self.body_radius
        )
    }
}
