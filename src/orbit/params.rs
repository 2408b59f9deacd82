//! # Orbit mapper configuration
//!
//! [`MapperParams`] holds every scale factor used to turn raw KOI catalog values into
//! scene-space orbital elements, plus the strategy used to pick the ascending node.
//!
//! Defaults
//! -----------------
//! * `spacing_scale`: 2.0 (width of the band normalized orbits are spread over)
//! * `min_offset`: 3.0 (smallest semi-major axis in the scene)
//! * `min_sma_denominator`: 1.0 (floor of the batch-wide SMA denominator)
//! * `radius_divisor`: 20.0 (Earth radii → scene units)
//! * `min_radius`: 0.03 (smallest drawn body)
//! * `orbit_speed_scale`: 0.5 (rate numerator)
//! * `min_period`: 1.0 (period floor, days)
//! * `max_eccentricity`: 0.8 (ellipse ceiling)
//! * `node_angle`: [`NodeAngleStrategy::Random`] with OS entropy
//!
//! Validation
//! -----------------
//! * `spacing_scale ≥ 0`, `min_offset > 0` so every semi-major axis is strictly positive.
//! * `min_sma_denominator > 0`, `radius_divisor > 0`, `min_radius > 0`, `min_period > 0`.
//! * `orbit_speed_scale ≥ 0`.
//! * `0 ≤ max_eccentricity < 1` so orbits stay closed ellipses.
//! * A fixed node angle must be finite.
use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

use crate::{
    constants::{
        Degree, MAX_ECCENTRICITY, MIN_OFFSET, MIN_PERIOD, MIN_RADIUS, MIN_SMA_DENOMINATOR,
        ORBIT_SPEED_SCALE, RADIUS_DIVISOR, SPACING_SCALE,
    },
    koiviz_errors::KoivizError,
};

/// How the longitude of the ascending node is chosen.
///
/// Catalogs almost never report Ω, so it is a cosmetic choice: spreading nodes at random
/// keeps orbits from all lying in the same plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeAngleStrategy {
    /// Uniform in `[0, 360)` degrees. `seed: None` draws from OS entropy; a seed makes the
    /// sequence reproducible.
    Random { seed: Option<u64> },
    /// Same Ω for every body.
    Fixed(Degree),
}

impl Default for NodeAngleStrategy {
    fn default() -> Self {
        NodeAngleStrategy::Random { seed: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapperParams {
    pub spacing_scale: f64,
    pub min_offset: f64,
    pub min_sma_denominator: f64,
    pub radius_divisor: f64,
    pub min_radius: f64,
    pub orbit_speed_scale: f64,
    pub min_period: f64,
    pub max_eccentricity: f64,
    pub node_angle: NodeAngleStrategy,
}

impl MapperParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`MapperParamsBuilder`] starting from the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use koiviz::orbit::params::{MapperParams, NodeAngleStrategy};
    ///
    /// let params = MapperParams::builder()
    ///     .max_eccentricity(0.5)
    ///     .node_angle(NodeAngleStrategy::Random { seed: Some(7) })
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.max_eccentricity, 0.5);
    /// ```
    pub fn builder() -> MapperParamsBuilder {
        MapperParamsBuilder::new()
    }
}

impl Default for MapperParams {
    fn default() -> Self {
        MapperParams {
            spacing_scale: SPACING_SCALE,
            min_offset: MIN_OFFSET,
            min_sma_denominator: MIN_SMA_DENOMINATOR,
            radius_divisor: RADIUS_DIVISOR,
            min_radius: MIN_RADIUS,
            orbit_speed_scale: ORBIT_SPEED_SCALE,
            min_period: MIN_PERIOD,
            max_eccentricity: MAX_ECCENTRICITY,
            node_angle: NodeAngleStrategy::default(),
        }
    }
}

/// Builder for [`MapperParams`], with validation.
#[derive(Debug, Clone)]
pub struct MapperParamsBuilder {
    params: MapperParams,
}

impl Default for MapperParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MapperParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: MapperParams::default(),
        }
    }

    pub fn spacing_scale(mut self, v: f64) -> Self {
        self.params.spacing_scale = v;
        self
    }
    pub fn min_offset(mut self, v: f64) -> Self {
        self.params.min_offset = v;
        self
    }
    pub fn min_sma_denominator(mut self, v: f64) -> Self {
        self.params.min_sma_denominator = v;
        self
    }
    pub fn radius_divisor(mut self, v: f64) -> Self {
        self.params.radius_divisor = v;
        self
    }
    pub fn min_radius(mut self, v: f64) -> Self {
        self.params.min_radius = v;
        self
    }
    pub fn orbit_speed_scale(mut self, v: f64) -> Self {
        self.params.orbit_speed_scale = v;
        self
    }
    pub fn min_period(mut self, v: f64) -> Self {
        self.params.min_period = v;
        self
    }
    pub fn max_eccentricity(mut self, v: f64) -> Self {
        self.params.max_eccentricity = v;
        self
    }
    pub fn node_angle(mut self, v: NodeAngleStrategy) -> Self {
        self.params.node_angle = v;
        self
    }

    /// Shorthand for a reproducible random node angle.
    pub fn seed(self, seed: u64) -> Self {
        self.node_angle(NodeAngleStrategy::Random { seed: Some(seed) })
    }

    // NaN compares as None and is rejected everywhere.
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    #[inline]
    fn lt1(x: f64) -> bool {
        x.partial_cmp(&1.0) == Some(Less)
    }

    /// Validate and produce the [`MapperParams`].
    ///
    /// Returns
    /// -----------------
    /// * `Ok(MapperParams)` when every rule listed in the module documentation holds.
    /// * `Err(KoivizError::InvalidMapperParameter)` naming the first violated rule.
    pub fn build(self) -> Result<MapperParams, KoivizError> {
        let p = &self.params;

        if !Self::ge0(p.spacing_scale) {
            return Err(KoivizError::InvalidMapperParameter(
                "spacing_scale must be >= 0".into(),
            ));
        }
        if !Self::gt0(p.min_offset) {
            return Err(KoivizError::InvalidMapperParameter(
                "min_offset must be > 0".into(),
            ));
        }
        if !Self::gt0(p.min_sma_denominator) {
            return Err(KoivizError::InvalidMapperParameter(
                "min_sma_denominator must be > 0".into(),
            ));
        }
        if !Self::gt0(p.radius_divisor) || !Self::gt0(p.min_radius) {
            return Err(KoivizError::InvalidMapperParameter(
                "radius_divisor and min_radius must be > 0".into(),
            ));
        }
        if !Self::ge0(p.orbit_speed_scale) {
            return Err(KoivizError::InvalidMapperParameter(
                "orbit_speed_scale must be >= 0".into(),
            ));
        }
        if !Self::gt0(p.min_period) {
            return Err(KoivizError::InvalidMapperParameter(
                "min_period must be > 0".into(),
            ));
        }
        if !(Self::ge0(p.max_eccentricity) && Self::lt1(p.max_eccentricity)) {
            return Err(KoivizError::InvalidMapperParameter(
                "require 0 <= max_eccentricity < 1".into(),
            ));
        }
        if let NodeAngleStrategy::Fixed(angle) = p.node_angle {
            if !angle.is_finite() {
                return Err(KoivizError::InvalidMapperParameter(
                    "fixed node angle must be finite".into(),
                ));
            }
        }

        Ok(self.params)
    }
}

impl fmt::Display for MapperParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 40;
            writeln!(f, "Orbit Mapper Parameters")?;
            writeln!(f, "-----------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            line!(
                "spacing_scale       = {:.3}",
                self.spacing_scale,
                "Band width of normalized orbits"
            )?;
            line!(
                "min_offset          = {:.3}",
                self.min_offset,
                "Innermost semi-major axis"
            )?;
            line!(
                "min_sma_denominator = {:.3}",
                self.min_sma_denominator,
                "Floor of the SMA normalizer"
            )?;
            line!(
                "radius_divisor      = {:.3}",
                self.radius_divisor,
                "Earth radii per scene unit"
            )?;
            line!(
                "min_radius          = {:.3}",
                self.min_radius,
                "Smallest drawn body"
            )?;
            line!(
                "orbit_speed_scale   = {:.3}",
                self.orbit_speed_scale,
                "Rate numerator"
            )?;
            line!(
                "min_period          = {:.3} d",
                self.min_period,
                "Period floor"
            )?;
            line!(
                "max_eccentricity    = {:.3}",
                self.max_eccentricity,
                "Eccentricity ceiling"
            )?;
            line!(
                "node_angle          = {:?}",
                self.node_angle,
                "Ascending node strategy"
            )?;
            Ok(())
        } else {
            write!(
                f,
                "MapperParams(a = sma/max*{:.2}+{:.2}, radius = max({:.3}, prad/{:.1}), rate = {:.2}/max(P,{:.1}), e≤{:.2}, node={:?})",
                self.spacing_scale,
                self.min_offset,
                self.min_radius,
                self.radius_divisor,
                self.orbit_speed_scale,
                self.min_period,
                self.max_eccentricity,
                self.node_angle,
            )
        }
    }
}

#[cfg(test)]
mod params_test {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let params = MapperParams::builder().build().unwrap();
        assert_eq!(params, MapperParams::default());
        assert_eq!(params.spacing_scale, 2.0);
        assert_eq!(params.min_offset, 3.0);
        assert_eq!(params.max_eccentricity, 0.8);
    }

    #[test]
    fn test_rejects_open_orbits() {
        let err = MapperParams::builder().max_eccentricity(1.0).build();
        assert_eq!(
            err,
            Err(KoivizError::InvalidMapperParameter(
                "require 0 <= max_eccentricity < 1".into()
            ))
        );
        assert!(MapperParams::builder()
            .max_eccentricity(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(MapperParams::builder().min_offset(0.0).build().is_err());
        assert!(MapperParams::builder().radius_divisor(-1.0).build().is_err());
        assert!(MapperParams::builder().min_period(0.0).build().is_err());
        assert!(MapperParams::builder()
            .node_angle(NodeAngleStrategy::Fixed(f64::INFINITY))
            .build()
            .is_err());
    }

    #[test]
    fn test_display() {
        let params = MapperParams::builder().seed(3).build().unwrap();
        let short = format!("{params}");
        assert!(short.starts_with("MapperParams("));
        let long = format!("{params:#}");
        assert!(long.contains("max_eccentricity    = 0.800"));
        assert!(long.contains("Some(3)"));
    }
}
