//! # Orbit frame transform
//!
//! Places the 2D orbital-plane ellipse into the 3D scene. The star sits at the origin of
//! both frames; the orbital plane is the local `z = 0` plane with periapsis on `+x`.
//!
//! The orientation is the classical 3-1-3 sequence
//!
//! ```text
//! R = Rz(Ω) · Rx(i) · Rz(ω)        world = R · (x, y, 0)ᵀ
//! ```
//!
//! applied in that fixed order. Each factor is an **active** right-handed rotation of the
//! vector (counter-clockwise looking down the axis toward the origin).
//!
//! [`OrbitFrame`] caches `R` per body so the per-frame work is one matrix-vector product.
use nalgebra::{Point2, Point3, Rotation3, Vector2, Vector3};

use crate::{
    constants::{Radian, SceneUnit, DPI, ORBIT_CURVE_SEGMENTS},
    conversion::deg_to_rad,
    orbit::OrbitalElements,
};

/// Principal axes for elementary rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Right-handed active rotation of `alpha` radians about a principal axis.
pub fn rotation_about(axis: Axis, alpha: Radian) -> Rotation3<f64> {
    let unit = match axis {
        Axis::X => Vector3::x_axis(),
        Axis::Y => Vector3::y_axis(),
        Axis::Z => Vector3::z_axis(),
    };
    Rotation3::from_axis_angle(&unit, alpha)
}

/// `Rz(Ω) · Rx(i) · Rz(ω)` for angles given in radians.
pub fn orbit_rotation(node: Radian, inclination: Radian, periapsis: Radian) -> Rotation3<f64> {
    rotation_about(Axis::Z, node)
        * rotation_about(Axis::X, inclination)
        * rotation_about(Axis::Z, periapsis)
}

/// Precomputed orientation of one orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitFrame {
    rotation: Rotation3<f64>,
}

impl OrbitFrame {
    /// Build the frame from the element angles (degrees).
    pub fn from_elements(elements: &OrbitalElements) -> Self {
        OrbitFrame {
            rotation: orbit_rotation(
                deg_to_rad(elements.longitude_of_ascending_node),
                deg_to_rad(elements.inclination),
                deg_to_rad(elements.argument_of_periapsis),
            ),
        }
    }

    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// Orbital-plane position → scene position.
    pub fn to_world(&self, local: &Vector2<SceneUnit>) -> Point3<SceneUnit> {
        Point3::from(self.rotation * Vector3::new(local.x, local.y, 0.0))
    }

    /// Normal of the orbital plane in the scene (direction of the angular momentum).
    pub fn plane_normal(&self) -> Vector3<f64> {
        self.rotation * Vector3::z()
    }
}

/// One-shot variant of [`OrbitFrame::to_world`].
pub fn orbit_to_world(local: &Vector2<SceneUnit>, elements: &OrbitalElements) -> Point3<SceneUnit> {
    OrbitFrame::from_elements(elements).to_world(local)
}

/// Sample the orbit ellipse in the orbital plane.
///
/// The ellipse of semi-axes `(a, a·√(1−e²))` is sampled at `segments + 1` evenly spaced
/// parameter values over `[0, 2π]` (first and last point coincide), then shifted by
/// `−a·e` along `x` so its focus is at the origin.
///
/// Arguments
/// ---------
/// * `elements`: orbit shape (`a`, `e`)
/// * `segments`: number of line segments; `0` yields the single starting point
///
/// Return
/// ------
/// * `segments + 1` points, starting at periapsis `(a(1−e), 0)`
pub fn local_orbit_curve(elements: &OrbitalElements, segments: usize) -> Vec<Point2<SceneUnit>> {
    let a = elements.semi_major_axis;
    let b = elements.semi_minor_axis();
    let shift = -a * elements.eccentricity;
    let step = if segments == 0 {
        0.0
    } else {
        DPI / segments as f64
    };

    (0..=segments)
        .map(|k| {
            let theta = k as f64 * step;
            Point2::new(a * theta.cos() + shift, b * theta.sin())
        })
        .collect()
}

/// Orbit ellipse in scene coordinates, see [`local_orbit_curve`].
pub fn orbit_curve(elements: &OrbitalElements, segments: usize) -> Vec<Point3<SceneUnit>> {
    let frame = OrbitFrame::from_elements(elements);
    local_orbit_curve(elements, segments)
        .into_iter()
        .map(|p| frame.to_world(&p.coords))
        .collect()
}

/// [`orbit_curve`] with the default resolution.
pub fn default_orbit_curve(elements: &OrbitalElements) -> Vec<Point3<SceneUnit>> {
    orbit_curve(elements, ORBIT_CURVE_SEGMENTS)
}
