//! # Catalog row → orbital elements
//!
//! [`OrbitMapper`] converts raw KOI records into bounded, renderable [`OrbitalElements`].
//!
//! Mapping rules (with default [`MapperParams`])
//! -----------------
//! | element                       | source column | rule                                   |
//! |-------------------------------|---------------|----------------------------------------|
//! | `semi_major_axis`             | `koi_sma`     | `sma / max_sma * 2 + 3`                |
//! | `body_radius`                 | `koi_prad`    | `max(0.03, prad / 20)`, absent prad = 1 |
//! | `orbit_angular_rate`          | `koi_period`  | `0.5 / max(period, 1)`                 |
//! | `eccentricity`                | `koi_eccen`   | clamped to `[0, 0.8]`                  |
//! | `inclination`                 | `koi_incl`    | copied (degrees)                       |
//! | `argument_of_periapsis`       | `koi_longp`   | copied (degrees)                       |
//! | `longitude_of_ascending_node` | –             | [`NodeAngleStrategy`]                  |
//! | `color`                       | row index     | cyclic palette                         |
//!
//! `max_sma = max(1, largest raw sma of the batch)` is computed once per batch so the
//! widest orbit lands at `a = 5` whenever that sma is at least 1.
//!
//! A missing, blank, unparseable or non-finite cell never fails the row. An absent or
//! blank `koi_prad` reads as `1`; every other unusable cell reads as `0` and unparseable
//! ones are reported at `debug` level. A negative `koi_sma` counts as `0`, so
//! `semi_major_axis >= min_offset` always holds.
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use super::{
    orbital_elements::OrbitalElements,
    params::{MapperParams, NodeAngleStrategy},
};
use crate::{
    catalog::RawRecord,
    constants::{Degree, DEFAULT_PLANET_RADIUS, FULL_TURN_DEG, PLANET_PALETTE},
    conversion::parse_lenient,
};

/// Catalog keys read by the mapper.
pub const PERIOD_KEY: &str = "koi_period";
pub const RADIUS_KEY: &str = "koi_prad";
pub const SMA_KEY: &str = "koi_sma";
pub const ECCENTRICITY_KEY: &str = "koi_eccen";
pub const INCLINATION_KEY: &str = "koi_incl";
pub const PERIAPSIS_KEY: &str = "koi_longp";

/// Stateful mapper: owns the parameters and the node-angle random generator.
///
/// With [`NodeAngleStrategy::Random { seed: Some(_) }`](NodeAngleStrategy::Random) two
/// mappers built from the same parameters produce identical batches.
#[derive(Debug, Clone)]
pub struct OrbitMapper {
    params: MapperParams,
    rng: StdRng,
}

impl Default for OrbitMapper {
    fn default() -> Self {
        Self::new(MapperParams::default())
    }
}

impl OrbitMapper {
    pub fn new(params: MapperParams) -> Self {
        let rng = match params.node_angle {
            NodeAngleStrategy::Random { seed: Some(seed) } => StdRng::seed_from_u64(seed),
            _ => StdRng::from_os_rng(),
        };
        OrbitMapper { params, rng }
    }

    pub fn params(&self) -> &MapperParams {
        &self.params
    }

    /// Normalization denominator of a batch: `max(min_sma_denominator, max raw sma)`.
    ///
    /// Rows without a usable `koi_sma` count as `0` and never lower the floor.
    pub fn max_sma(&self, rows: &[RawRecord]) -> f64 {
        rows.iter()
            .map(read_sma)
            .fold(self.params.min_sma_denominator, f64::max)
    }

    fn next_node_angle(&mut self) -> Degree {
        match self.params.node_angle {
            NodeAngleStrategy::Fixed(angle) => angle,
            NodeAngleStrategy::Random { .. } => self.rng.random_range(0.0..FULL_TURN_DEG),
        }
    }

    /// Map one raw record.
    ///
    /// Arguments
    /// ---------
    /// * `row`: the record, keyed by normalized header
    /// * `index`: position of the row in its batch, selects the palette colour
    /// * `max_sma`: batch normalization denominator, see [`OrbitMapper::max_sma`]
    ///
    /// Return
    /// ------
    /// * the elements; this never fails
    pub fn map_row_to_orbit(
        &mut self,
        row: &RawRecord,
        index: usize,
        max_sma: f64,
    ) -> OrbitalElements {
        let p = &self.params;

        let period = read_field(row, PERIOD_KEY, 0.0);
        let radius = read_field(row, RADIUS_KEY, DEFAULT_PLANET_RADIUS);
        let sma = read_sma(row);
        let eccentricity = read_field(row, ECCENTRICITY_KEY, 0.0);
        let inclination = read_field(row, INCLINATION_KEY, 0.0);
        let argument_of_periapsis = read_field(row, PERIAPSIS_KEY, 0.0);

        let semi_major_axis = (sma / max_sma) * p.spacing_scale + p.min_offset;
        let body_radius = p.min_radius.max(radius / p.radius_divisor);
        let orbit_angular_rate = p.orbit_speed_scale / period.max(p.min_period);
        let eccentricity = eccentricity.clamp(0.0, p.max_eccentricity);
        let color = PLANET_PALETTE[index % PLANET_PALETTE.len()].to_string();

        OrbitalElements {
            semi_major_axis,
            eccentricity,
            inclination,
            longitude_of_ascending_node: self.next_node_angle(),
            argument_of_periapsis,
            orbit_angular_rate,
            body_radius,
            color,
        }
    }

    /// Map a whole import, computing the normalization denominator once.
    pub fn map_batch(&mut self, rows: &[RawRecord]) -> Vec<OrbitalElements> {
        let max_sma = self.max_sma(rows);
        debug!(rows = rows.len(), max_sma, "mapping catalog batch to orbits");
        rows.iter()
            .enumerate()
            .map(|(index, row)| self.map_row_to_orbit(row, index, max_sma))
            .collect()
    }
}

/// Numeric cell: `absent` when the cell is missing or blank, `0` when it does not parse.
fn read_field(row: &RawRecord, key: &str, absent: f64) -> f64 {
    match row.get_non_empty(key) {
        None => absent,
        Some(text) => parse_lenient(text).unwrap_or_else(|| {
            debug!(key, value = text, "unusable catalog value, using 0");
            0.0
        }),
    }
}

fn read_sma(row: &RawRecord) -> f64 {
    read_field(row, SMA_KEY, 0.0).max(0.0)
}

#[cfg(test)]
mod mapper_test {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        let headers: Vec<String> = pairs.iter().map(|(k, _)| k.to_string()).collect();
        let values: Vec<String> = pairs.iter().map(|(_, v)| v.to_string()).collect();
        RawRecord::from_parts(&headers, &values)
    }

    fn fixed_mapper() -> OrbitMapper {
        OrbitMapper::new(
            MapperParams::builder()
                .node_angle(NodeAngleStrategy::Fixed(45.0))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_reference_row() {
        let mut mapper = fixed_mapper();
        let row = record(&[
            ("koi_period", "365"),
            ("koi_prad", "1"),
            ("koi_sma", "1"),
            ("koi_eccen", "0.1"),
            ("koi_incl", "90"),
            ("koi_longp", "0"),
        ]);
        let el = mapper.map_row_to_orbit(&row, 0, 5.0);

        assert!((el.semi_major_axis - 3.4).abs() < 1e-12);
        assert_eq!(el.body_radius, 0.05);
        assert!((el.orbit_angular_rate - 0.5 / 365.0).abs() < 1e-15);
        assert_eq!(el.eccentricity, 0.1);
        assert_eq!(el.inclination, 90.0);
        assert_eq!(el.argument_of_periapsis, 0.0);
        assert_eq!(el.longitude_of_ascending_node, 45.0);
        assert_eq!(el.color, PLANET_PALETTE[0]);
    }

    #[test]
    fn test_fallbacks() {
        let mut mapper = fixed_mapper();
        let row = record(&[("koi_period", "abc"), ("koi_prad", ""), ("koi_eccen", "NaN")]);
        let el = mapper.map_row_to_orbit(&row, 9, 1.0);

        assert_eq!(el.semi_major_axis, 3.0);
        assert_eq!(el.body_radius, 0.05);
        assert_eq!(el.orbit_angular_rate, 0.5);
        assert_eq!(el.eccentricity, 0.0);
        assert_eq!(el.color, PLANET_PALETTE[1]);
    }

    #[test]
    fn test_unparseable_radius_reads_as_zero() {
        let mut mapper = fixed_mapper();
        let unparseable = mapper.map_row_to_orbit(&record(&[("koi_prad", "n/a")]), 0, 1.0);
        let absent = mapper.map_row_to_orbit(&record(&[("koi_period", "10")]), 0, 1.0);
        assert_eq!(unparseable.body_radius, 0.03);
        assert_eq!(absent.body_radius, 0.05);
    }

    #[test]
    fn test_negative_sma_counts_as_zero() {
        let mut mapper = fixed_mapper();
        let rows = vec![record(&[("koi_sma", "-10")]), record(&[("koi_sma", "0.5")])];
        assert_eq!(mapper.max_sma(&rows), 1.0);

        let orbits = mapper.map_batch(&rows);
        assert_eq!(orbits[0].semi_major_axis, 3.0);
        assert_eq!(orbits[1].semi_major_axis, 4.0);
        assert!(orbits.iter().all(|el| el.semi_major_axis > 0.0));

        let only_negative = vec![record(&[("koi_sma", "-3")])];
        assert_eq!(mapper.max_sma(&only_negative), 1.0);
    }

    #[test]
    fn test_eccentricity_and_radius_bounds() {
        let mut mapper = fixed_mapper();
        let high = mapper.map_row_to_orbit(&record(&[("koi_eccen", "5")]), 0, 1.0);
        let low = mapper.map_row_to_orbit(
            &record(&[("koi_eccen", "-0.3"), ("koi_prad", "0.1")]),
            0,
            1.0,
        );
        assert_eq!(high.eccentricity, 0.8);
        assert_eq!(low.eccentricity, 0.0);
        assert_eq!(low.body_radius, 0.03);
    }

    #[test]
    fn test_batch_normalization() {
        let mut mapper = fixed_mapper();
        let rows = vec![
            record(&[("koi_sma", "1")]),
            record(&[("koi_sma", "5")]),
            record(&[("koi_sma", "")]),
        ];
        assert_eq!(mapper.max_sma(&rows), 5.0);

        let orbits = mapper.map_batch(&rows);
        assert_eq!(orbits.len(), 3);
        assert!((orbits[0].semi_major_axis - 3.4).abs() < 1e-12);
        assert_eq!(orbits[1].semi_major_axis, 5.0);
        assert_eq!(orbits[2].semi_major_axis, 3.0);
    }

    #[test]
    fn test_small_sma_uses_floor() {
        let mapper = fixed_mapper();
        let rows = vec![record(&[("koi_sma", "0.05")]), record(&[("koi_sma", "0.5")])];
        assert_eq!(mapper.max_sma(&rows), 1.0);
        assert_eq!(mapper.max_sma(&[]), 1.0);
    }

    #[test]
    fn test_seeded_node_angles_are_reproducible() {
        let params = MapperParams::builder().seed(42).build().unwrap();
        let rows = vec![RawRecord::default(); 16];

        let first = OrbitMapper::new(params.clone()).map_batch(&rows);
        let second = OrbitMapper::new(params).map_batch(&rows);

        assert_eq!(first, second);
        assert!(first
            .iter()
            .all(|el| (0.0..360.0).contains(&el.longitude_of_ascending_node)));
        assert!(first
            .windows(2)
            .any(|w| w[0].longitude_of_ascending_node != w[1].longitude_of_ascending_node));
    }
}
