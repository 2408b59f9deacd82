use itertools::Itertools;
use thiserror::Error;

use crate::catalog::CanonicalField;

#[derive(Error, Debug)]
pub enum KoivizError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV reader error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("The imported table contains no data rows")]
    EmptyImport,

    #[error("Missing required columns: {}", .0.iter().map(|c| c.as_str()).join(", "))]
    MissingColumns(Vec<CanonicalField>),

    #[error("Classifier service answered with status {status}: {body}")]
    ClassifierStatus { status: u16, body: String },

    #[error("Classifier service reported a failed prediction (ok = false)")]
    ClassifierRejected,

    #[error("Visibility vector length {got} does not match orbit count {expected}")]
    VisibilityLengthMismatch { expected: usize, got: usize },

    #[error("Invalid mapper parameter: {0}")]
    InvalidMapperParameter(String),

    #[error("Invalid training hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("Row index {index} out of range (table has {len} rows)")]
    RowIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid clock time scale: {0}")]
    InvalidClockScale(f64),
}

impl PartialEq for KoivizError {
    fn eq(&self, other: &Self) -> bool {
        use KoivizError::*;
        match (self, other) {
            // wrapped errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (ReqwestError(_), ReqwestError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            (MissingColumns(a), MissingColumns(b)) => a == b,
            (
                ClassifierStatus {
                    status: s1,
                    body: b1,
                },
                ClassifierStatus {
                    status: s2,
                    body: b2,
                },
            ) => s1 == s2 && b1 == b2,
            (
                VisibilityLengthMismatch {
                    expected: e1,
                    got: g1,
                },
                VisibilityLengthMismatch {
                    expected: e2,
                    got: g2,
                },
            ) => e1 == e2 && g1 == g2,
            (InvalidMapperParameter(a), InvalidMapperParameter(b)) => a == b,
            (InvalidHyperparameter(a), InvalidHyperparameter(b)) => a == b,
            (
                RowIndexOutOfRange { index: i1, len: l1 },
                RowIndexOutOfRange { index: i2, len: l2 },
            ) => i1 == i2 && l1 == l2,
            (InvalidClockScale(a), InvalidClockScale(b)) => a == b,

            (EmptyImport, EmptyImport) => true,
            (ClassifierRejected, ClassifierRejected) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod koiviz_errors_test {
    use super::*;

    #[test]
    fn test_missing_columns_message() {
        let err = KoivizError::MissingColumns(vec![
            CanonicalField::Duration,
            CanonicalField::Kepmag,
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required columns: koi_duration, koi_kepmag"
        );
    }

    #[test]
    fn test_partial_eq_by_payload() {
        assert_eq!(KoivizError::EmptyImport, KoivizError::EmptyImport);
        assert_ne!(
            KoivizError::RowIndexOutOfRange { index: 1, len: 1 },
            KoivizError::RowIndexOutOfRange { index: 2, len: 1 }
        );
        assert_ne!(KoivizError::EmptyImport, KoivizError::ClassifierRejected);
    }
}
