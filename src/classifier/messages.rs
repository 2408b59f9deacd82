//! Wire types of the prediction endpoint and the model registry.
//!
//! The service is loose about types: a prediction label may come back as `"1"` or `1`,
//! a confidence as `0.93` or `"0.93"`. Both are accepted and normalized here, so the rest
//! of the crate only sees `Option<String>` labels and `Option<f64>` confidences.
use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    catalog::{required_columns, CatalogRow},
    conversion::parse_lenient,
};

/// Label code of a false positive. Every other label is shown in the scene.
pub const FALSE_POSITIVE_LABEL: &str = "0";

/// Body of `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierRequest {
    pub columns: Vec<&'static str>,
    pub rows: Vec<CatalogRow>,
}

impl ClassifierRequest {
    pub fn new(rows: Vec<CatalogRow>) -> Self {
        ClassifierRequest {
            columns: required_columns(),
            rows,
        }
    }
}

/// Body returned by `POST /api/predict`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifierResponse {
    pub ok: bool,
    #[serde(default)]
    pub rows: Vec<PredictionRow>,
}

/// One classified row: the label, its confidence and whatever the service echoed back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictionRow {
    #[serde(default, deserialize_with = "de_label")]
    pub prediction: Option<String>,
    #[serde(default, deserialize_with = "de_confidence")]
    pub confidence: Option<f64>,
    /// Echoed canonical fields and any extra column, kept as-is.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl PredictionRow {
    pub fn with_label(label: &str) -> Self {
        PredictionRow {
            prediction: Some(label.to_string()),
            ..Default::default()
        }
    }

    /// Human-readable class of the label.
    pub fn label_name(&self) -> Option<PredictionLabel> {
        self.prediction.as_deref().map(PredictionLabel::from_code)
    }

    pub fn confidence_level(&self) -> Option<ConfidenceLevel> {
        self.confidence.map(ConfidenceLevel::from_confidence)
    }
}

fn de_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn de_confidence<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_lenient(&s),
        _ => None,
    })
}

/// Classes known to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionLabel {
    FalsePositive,
    PlanetCandidate,
    ConfirmedPlanet,
    Unknown(String),
}

impl PredictionLabel {
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => PredictionLabel::FalsePositive,
            "1" => PredictionLabel::PlanetCandidate,
            "2" => PredictionLabel::ConfirmedPlanet,
            other => PredictionLabel::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionLabel::FalsePositive => f.write_str("False Positive"),
            PredictionLabel::PlanetCandidate => f.write_str("Planet Candidate"),
            PredictionLabel::ConfirmedPlanet => f.write_str("Confirmed Planet"),
            PredictionLabel::Unknown(code) => f.write_str(code),
        }
    }
}

/// Confidence band used to colour results: high (≥ 0.7), medium (≥ 0.5), low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.7 {
            ConfidenceLevel::High
        } else if confidence >= 0.5 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Entry of `GET /api/models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub trained_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Body of `POST /api/models/select`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectModelRequest<'a> {
    pub model_id: &'a str,
}
