//! # Kepler solver
//!
//! Elapsed clock time + [`OrbitalElements`] → position in the orbital plane, with the
//! attracting focus at the origin and periapsis on the +x axis.
//!
//! Pipeline
//! -----------------
//! 1. Mean anomaly `M = (t · n · 2π) mod 2π`, with `n` the orbit angular rate in turns per
//!    clock unit. The Euclidean remainder keeps `M ∈ [0, 2π)` for negative `t` too.
//! 2. Eccentric anomaly by fixed-point relaxation `E ← M + e·sin E`, seeded at `E = M`.
//!    The iteration budget is fixed (5 by default) and there is no convergence test: for
//!    `e ≤ 0.8` the residual is small enough for display, and a fixed budget keeps the
//!    per-frame cost constant.
//! 3. True anomaly `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`.
//! 4. Radius `r = a(1 − e·cos E)`, position `(r cos ν, r sin ν)`.
//!
//! Whatever the residual of step 2, `r` and `ν` come from the same `E`, so the returned
//! point always lies on the ellipse and `a(1−e) ≤ r ≤ a(1+e)` holds exactly.
use nalgebra::Vector2;

use crate::{
    constants::{Radian, SceneUnit, SimTime, DPI, KEPLER_ITERATIONS},
    orbit::OrbitalElements,
};

/// Principal value of an angle, in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Everything computed for one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    pub true_anomaly: Radian,
    pub radius: SceneUnit,
    /// Position in the orbital plane, focus at the origin.
    pub position: Vector2<SceneUnit>,
}

/// Fixed-iteration solver of Kepler's equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeplerSolver {
    iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            iterations: KEPLER_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with a custom relaxation budget. `0` returns `E = M`.
    pub fn with_iterations(iterations: usize) -> Self {
        KeplerSolver { iterations }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Mean anomaly reached after `t` clock units.
    pub fn mean_anomaly(&self, elements: &OrbitalElements, t: SimTime) -> Radian {
        principal_angle(t * elements.orbit_angular_rate * DPI)
    }

    /// Eccentric anomaly `E` for a mean anomaly `M`.
    ///
    /// Arguments
    /// ---------
    /// * `mean_anomaly`: `M` in radians
    /// * `eccentricity`: `e`, expected in `[0, 1)`
    ///
    /// Return
    /// ------
    /// * `E` after the configured number of relaxation steps
    pub fn eccentric_anomaly(&self, mean_anomaly: Radian, eccentricity: f64) -> Radian {
        (0..self.iterations).fold(mean_anomaly, |e_anomaly, _| {
            mean_anomaly + eccentricity * e_anomaly.sin()
        })
    }

    /// Full state of a body at time `t`.
    pub fn state_at(&self, elements: &OrbitalElements, t: SimTime) -> OrbitState {
        let e = elements.eccentricity;
        let mean_anomaly = self.mean_anomaly(elements, t);
        let eccentric_anomaly = self.eccentric_anomaly(mean_anomaly, e);
        let true_anomaly = true_anomaly(eccentric_anomaly, e);
        let radius = orbital_radius(elements.semi_major_axis, e, eccentric_anomaly);

        OrbitState {
            mean_anomaly,
            eccentric_anomaly,
            true_anomaly,
            radius,
            position: Vector2::new(radius * true_anomaly.cos(), radius * true_anomaly.sin()),
        }
    }

    /// Orbital-plane position at time `t`, focus at the origin.
    pub fn position_at(&self, elements: &OrbitalElements, t: SimTime) -> Vector2<SceneUnit> {
        self.state_at(elements, t).position
    }
}

/// True anomaly from the eccentric anomaly, quadrant-safe.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let half = eccentric_anomaly / 2.0;
    let y = (1.0 + eccentricity).sqrt() * half.sin();
    let x = (1.0 - eccentricity).sqrt() * half.cos();
    2.0 * y.atan2(x)
}

/// Distance to the focus, `a(1 − e·cos E)`.
pub fn orbital_radius(
    semi_major_axis: SceneUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> SceneUnit {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}

/// [`KeplerSolver::position_at`] with the default solver.
pub fn position_at(elements: &OrbitalElements, t: SimTime) -> Vector2<SceneUnit> {
    KeplerSolver::default().position_at(elements, t)
}
