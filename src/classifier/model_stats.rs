//! Evaluation metrics of a trained model, as reported by the training service.
use std::collections::BTreeMap;

use serde::Deserialize;

/// Per-class precision/recall figures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ClassMetrics {
    #[serde(default)]
    pub precision: Option<f64>,
    #[serde(default)]
    pub recall: Option<f64>,
    #[serde(default, rename = "f1-score", alias = "f1")]
    pub f1_score: Option<f64>,
    #[serde(default)]
    pub support: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelStats {
    /// Global scores (`accuracy`, `macro_f1`, …) keyed by name.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub per_class: BTreeMap<String, ClassMetrics>,
    /// Rows are true classes, columns predicted classes.
    #[serde(default)]
    pub confusion_matrix: Vec<Vec<f64>>,
}

impl ModelStats {
    pub fn confusion_percentages(&self) -> Vec<Vec<f64>> {
        confusion_percentages(&self.confusion_matrix)
    }
}

/// Row-normalize a confusion matrix into percentages.
///
/// Each cell becomes `value / row_total * 100`; a row summing to zero stays all zeros.
pub fn confusion_percentages(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|row| {
            let total: f64 = row.iter().sum();
            row.iter()
                .map(|v| if total == 0.0 { 0.0 } else { v / total * 100.0 })
                .collect()
        })
        .collect()
}
