//! # Warm-start training jobs
//!
//! Payloads of the training endpoints:
//!
//! - `POST /api/train` (multipart): `algo=xgboost`, `model_id`, `warm_start=true`,
//!   `base_model_id`, `dataset_file`, and the [`Hyperparams`] as a JSON string. Answers
//!   with a [`TrainJob`].
//! - `GET /api/train/{job_id}`: a [`TrainStatus`] snapshot, polled until the stage is
//!   terminal.
//!
//! Hyperparameter ranges
//! -----------------
//! | name               | default | range          |
//! |--------------------|---------|----------------|
//! | `learning_rate`    | 0.1     | [0.01, 1]      |
//! | `n_estimators`     | 200     | [50, 5000]     |
//! | `thr1`             | 0.3     | [0.05, 0.95]   |
//! | `subsample`        | 0.8     | [0.1, 1]       |
//! | `colsample_bytree` | 0.8     | [0.1, 1]       |
use std::cmp::Ordering::{Equal, Greater, Less};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::koiviz_errors::KoivizError;

/// Training algorithm sent in the `algo` form field.
pub const TRAIN_ALGORITHM: &str = "xgboost";

/// Lifecycle of a training job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainStage {
    #[default]
    Idle,
    Uploading,
    Queued,
    Running,
    Completed,
    Failed,
}

impl TrainStage {
    /// `true` once polling can stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrainStage::Completed | TrainStage::Failed)
    }
}

/// Answer of `POST /api/train`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainJob {
    pub job_id: String,
}

/// Answer of `GET /api/train/{job_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainStatus {
    pub job_id: String,
    pub status: TrainStage,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub metrics: Option<Value>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TrainStatus {
    /// Progress clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        self.progress.clamp(0.0, 100.0)
    }
}

/// Append `incoming` log lines to `existing`, skipping lines already present.
///
/// The first occurrence keeps its position; the order of new lines is preserved.
pub fn merge_logs(existing: &[String], incoming: &[String]) -> Vec<String> {
    existing.iter().chain(incoming).unique().cloned().collect()
}

/// XGBoost hyperparameters of a warm-start run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hyperparams {
    pub learning_rate: f64,
    pub n_estimators: u32,
    pub thr1: f64,
    pub subsample: f64,
    pub colsample_bytree: f64,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Hyperparams {
            learning_rate: 0.1,
            n_estimators: 200,
            thr1: 0.3,
            subsample: 0.8,
            colsample_bytree: 0.8,
        }
    }
}

impl Hyperparams {
    pub fn builder() -> HyperparamsBuilder {
        HyperparamsBuilder::default()
    }

    /// JSON text sent in the `hparams` form field.
    pub fn to_json(&self) -> Result<String, KoivizError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HyperparamsBuilder {
    params: Hyperparams,
}

impl HyperparamsBuilder {
    pub fn learning_rate(mut self, v: f64) -> Self {
        self.params.learning_rate = v;
        self
    }
    pub fn n_estimators(mut self, v: u32) -> Self {
        self.params.n_estimators = v;
        self
    }
    pub fn thr1(mut self, v: f64) -> Self {
        self.params.thr1 = v;
        self
    }
    pub fn subsample(mut self, v: f64) -> Self {
        self.params.subsample = v;
        self
    }
    pub fn colsample_bytree(mut self, v: f64) -> Self {
        self.params.colsample_bytree = v;
        self
    }

    #[inline]
    fn within(x: f64, lo: f64, hi: f64) -> bool {
        matches!(x.partial_cmp(&lo), Some(Greater) | Some(Equal))
            && matches!(x.partial_cmp(&hi), Some(Less) | Some(Equal))
    }

    pub fn build(self) -> Result<Hyperparams, KoivizError> {
        let p = &self.params;
        let checks = [
            ("learning_rate", p.learning_rate, 0.01, 1.0),
            ("n_estimators", f64::from(p.n_estimators), 50.0, 5000.0),
            ("thr1", p.thr1, 0.05, 0.95),
            ("subsample", p.subsample, 0.1, 1.0),
            ("colsample_bytree", p.colsample_bytree, 0.1, 1.0),
        ];
        for (name, value, lo, hi) in checks {
            if !Self::within(value, lo, hi) {
                return Err(KoivizError::InvalidHyperparameter(format!(
                    "{name} = {value} outside [{lo}, {hi}]"
                )));
            }
        }
        Ok(self.params)
    }
}

/// Everything needed to submit one warm-start job, minus the dataset bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainRequest {
    pub model_id: String,
    pub base_model_id: String,
    pub hyperparams: Hyperparams,
}

#[cfg(test)]
mod training_test {
    use super::*;

    #[test]
    fn test_default_hyperparams_are_valid() {
        let params = Hyperparams::builder().build().unwrap();
        assert_eq!(params, Hyperparams::default());
        let json: Value = serde_json::from_str(&params.to_json().unwrap()).unwrap();
        assert_eq!(json["n_estimators"], 200);
        assert_eq!(json["learning_rate"], 0.1);
    }

    #[test]
    fn test_out_of_range_hyperparams() {
        assert_eq!(
            Hyperparams::builder().n_estimators(10).build(),
            Err(KoivizError::InvalidHyperparameter(
                "n_estimators = 10 outside [50, 5000]".into()
            ))
        );
        assert!(Hyperparams::builder().thr1(0.99).build().is_err());
        assert!(Hyperparams::builder().subsample(f64::NAN).build().is_err());
        assert!(Hyperparams::builder().learning_rate(1.0).build().is_ok());
    }

    #[test]
    fn test_status_payload() {
        let body = r#"{"job_id": "j1", "status": "running", "progress": 42, "logs": ["a", "b"]}"#;
        let status: TrainStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.status, TrainStage::Running);
        assert!(!status.status.is_terminal());
        assert_eq!(status.progress_percent(), 42.0);
        assert_eq!(status.model_id, None);

        let done: TrainStatus =
            serde_json::from_str(r#"{"job_id": "j1", "status": "failed", "error": "boom"}"#)
                .unwrap();
        assert!(done.status.is_terminal());
        assert_eq!(done.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_merge_logs() {
        let existing = vec!["load".to_string(), "fit".to_string()];
        let incoming = vec!["fit".to_string(), "eval".to_string(), "eval".to_string()];
        assert_eq!(merge_logs(&existing, &incoming), vec!["load", "fit", "eval"]);
    }
}
