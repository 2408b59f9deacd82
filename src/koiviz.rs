//! # Pipeline façade
//!
//! [`Koiviz`] wires the pieces together in data-flow order:
//!
//! ```text
//! RawTable ─┬─ check_structure ─ canonical rows ─► ClassifierClient ─► project_visibility ─┐
//!           └─ OrbitMapper ─────► OrbitalElements ─► SceneStore ◄───────────────────────────┘
//! ```
//!
//! Two import paths exist:
//!
//! - [`Koiviz::import_orbits`] only needs data rows: a table without the classifier
//!   columns still yields orbits, all hidden until visibility is set.
//! - [`Koiviz::import_for_prediction`] additionally rejects the table unless every
//!   canonical column is present, and returns the padded rows to classify.
//!
//! Every check runs before the store is touched, so a rejected import or a failed
//! classifier call leaves the previous scene as it was.
use std::sync::Arc;

use camino::Utf8Path;
use nalgebra::Point3;
use tracing::info;

use crate::{
    catalog::{validator::check_structure, CatalogRow, RawTable},
    classifier::{ClassifierClient, PredictionRow},
    constants::{SceneUnit, SimTime},
    env_state::ClassifierConfig,
    kepler::KeplerSolver,
    koiviz_errors::KoivizError,
    orbit::{MapperParams, OrbitMapper},
    orbit_frame::orbit_curve,
    store::{SceneSnapshot, SceneStore},
    visibility::project_visibility,
};

#[derive(Debug)]
pub struct Koiviz {
    mapper: OrbitMapper,
    solver: KeplerSolver,
    store: SceneStore,
    client: ClassifierClient,
}

impl Koiviz {
    pub fn new(params: MapperParams, config: ClassifierConfig) -> Result<Self, KoivizError> {
        Ok(Koiviz {
            mapper: OrbitMapper::new(params),
            solver: KeplerSolver::default(),
            store: SceneStore::new(),
            client: ClassifierClient::new(config)?,
        })
    }

    pub fn with_solver(mut self, solver: KeplerSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn client(&self) -> &ClassifierClient {
        &self.client
    }

    pub fn solver(&self) -> &KeplerSolver {
        &self.solver
    }

    pub fn store_mut(&mut self) -> &mut SceneStore {
        &mut self.store
    }

    pub fn snapshot(&self) -> Arc<SceneSnapshot> {
        self.store.snapshot()
    }

    /// Map every data row of `table` to an orbit and replace the scene.
    ///
    /// Return
    /// ------
    /// * the number of orbits installed
    /// * [`KoivizError::EmptyImport`] when the table has no data row
    pub fn import_orbits(&mut self, table: &RawTable) -> Result<usize, KoivizError> {
        if table.is_empty() {
            return Err(KoivizError::EmptyImport);
        }
        let orbits = self.mapper.map_batch(&table.raw_records());
        let count = orbits.len();
        self.store.replace_orbits(orbits);
        info!(orbits = count, "orbit import applied");
        Ok(count)
    }

    /// Strict import: validate the classifier columns, install the orbits, return the
    /// canonical rows to send for classification.
    pub fn import_for_prediction(
        &mut self,
        table: &RawTable,
    ) -> Result<Vec<CatalogRow>, KoivizError> {
        check_structure(table)?;
        let rows = table.canonical_rows();
        self.import_orbits(table)?;
        Ok(rows)
    }

    /// Read a CSV file and run [`Koiviz::import_orbits`] or [`Koiviz::import_for_prediction`].
    pub fn import_csv_path(
        &mut self,
        path: &Utf8Path,
        strict: bool,
    ) -> Result<Vec<CatalogRow>, KoivizError> {
        let table = RawTable::from_path(path)?;
        if strict {
            self.import_for_prediction(&table)
        } else {
            self.import_orbits(&table)?;
            Ok(table.canonical_rows())
        }
    }

    /// Turn classifier output into the scene visibility vector.
    pub fn apply_predictions(&mut self, rows: &[PredictionRow]) -> Result<(), KoivizError> {
        self.store.set_visibility(project_visibility(rows))
    }

    /// Send `rows` to the classifier and apply the answer.
    ///
    /// On any service error the scene is left as it was.
    pub async fn classify(
        &mut self,
        rows: &[CatalogRow],
    ) -> Result<Vec<PredictionRow>, KoivizError> {
        let predictions = self.client.predict(rows).await?;
        self.apply_predictions(&predictions)?;
        Ok(predictions)
    }

    /// Scene position of each visible body at clock time `t`.
    pub fn positions_at(&self, t: SimTime) -> Vec<(usize, Point3<SceneUnit>)> {
        self.store.snapshot().visible_positions(&self.solver, t)
    }

    /// Orbit ellipse of each body, in list order, `segments + 1` points each.
    pub fn orbit_curves(&self, segments: usize) -> Vec<Vec<Point3<SceneUnit>>> {
        self.store
            .snapshot()
            .orbits
            .iter()
            .map(|el| orbit_curve(el, segments))
            .collect()
    }
}

#[cfg(test)]
mod koiviz_test {
    use super::*;
    use crate::orbit::NodeAngleStrategy;

    fn pipeline() -> Koiviz {
        let params = MapperParams::builder()
            .node_angle(NodeAngleStrategy::Fixed(0.0))
            .build()
            .unwrap();
        Koiviz::new(params, ClassifierConfig::default()).unwrap()
    }

    #[test]
    fn test_orbit_import_without_classifier_columns() {
        let mut koiviz = pipeline();
        let table = RawTable::from_records(&[
            vec!["koi_period", "koi_sma"],
            vec!["10", "1"],
            vec!["20", "2"],
        ]);
        assert_eq!(koiviz.import_orbits(&table), Ok(2));
        assert_eq!(koiviz.snapshot().visibility, vec![false, false]);
        assert!(koiviz.positions_at(0.0).is_empty());

        // strict path refuses the same table and keeps the scene
        assert!(matches!(
            koiviz.import_for_prediction(&table),
            Err(KoivizError::MissingColumns(_))
        ));
        assert_eq!(koiviz.snapshot().len(), 2);
    }

    #[test]
    fn test_empty_import_keeps_scene() {
        let mut koiviz = pipeline();
        let table = RawTable::from_records(&[vec!["koi_sma"], vec!["1"]]);
        koiviz.import_orbits(&table).unwrap();

        let header_only = RawTable::from_records(&[vec!["koi_sma"]]);
        assert_eq!(
            koiviz.import_orbits(&header_only),
            Err(KoivizError::EmptyImport)
        );
        assert_eq!(koiviz.snapshot().len(), 1);
    }

    #[test]
    fn test_apply_predictions() {
        let mut koiviz = pipeline();
        let table = RawTable::from_records(&[vec!["koi_sma"], vec!["1"], vec!["2"], vec!["3"]]);
        koiviz.import_orbits(&table).unwrap();

        let rows: Vec<PredictionRow> = ["0", "1", "2"]
            .into_iter()
            .map(PredictionRow::with_label)
            .collect();
        koiviz.apply_predictions(&rows).unwrap();

        let visible: Vec<usize> = koiviz.positions_at(2.0).iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, vec![1, 2]);
        assert_eq!(koiviz.orbit_curves(8)[0].len(), 9);

        assert!(koiviz.apply_predictions(&rows[..1]).is_err());
        assert_eq!(koiviz.snapshot().visible_count(), 2);
    }
}
