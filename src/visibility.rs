//! Per-row "show in scene" flags derived from classifier output.
//!
//! A row is visible when its label is present and is not the false-positive code `"0"`.
//! Labels the crate does not know are visible. The output is index-aligned with the
//! input, which is itself index-aligned with the orbit list of the same import.
use crate::classifier::messages::{PredictionRow, FALSE_POSITIVE_LABEL};

pub fn is_visible(label: Option<&str>) -> bool {
    matches!(label, Some(code) if code != FALSE_POSITIVE_LABEL)
}

/// Visibility vector for a classifier response.
pub fn project_visibility(rows: &[PredictionRow]) -> Vec<bool> {
    rows.iter()
        .map(|row| is_visible(row.prediction.as_deref()))
        .collect()
}

/// Same projection over bare labels.
pub fn project_labels<S: AsRef<str>>(labels: &[Option<S>]) -> Vec<bool> {
    labels
        .iter()
        .map(|label| is_visible(label.as_ref().map(|s| s.as_ref())))
        .collect()
}

#[cfg(test)]
mod visibility_test {
    use super::*;

    #[test]
    fn test_project_visibility() {
        let rows: Vec<PredictionRow> = ["0", "1", "2"]
            .into_iter()
            .map(PredictionRow::with_label)
            .collect();
        assert_eq!(project_visibility(&rows), vec![false, true, true]);
    }

    #[test]
    fn test_missing_and_unknown_labels() {
        assert_eq!(
            project_labels(&[None, Some("CANDIDATE"), Some("0"), Some(" 0")]),
            vec![false, true, false, true]
        );
        assert!(project_visibility(&[]).is_empty());
    }
}
