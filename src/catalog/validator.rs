use std::collections::BTreeSet;

use tracing::warn;

use super::{csv_reader::RawTable, CanonicalField};
use crate::koiviz_errors::KoivizError;

/// Outcome of the required-column check.
///
/// `missing_columns` is in canonical order and empty exactly when `ok` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportValidation {
    pub ok: bool,
    pub missing_columns: Vec<CanonicalField>,
}

impl ImportValidation {
    fn from_observed(observed: &BTreeSet<CanonicalField>) -> Self {
        let missing_columns: Vec<CanonicalField> = CanonicalField::ALL
            .into_iter()
            .filter(|f| !observed.contains(f))
            .collect();
        ImportValidation {
            ok: missing_columns.is_empty(),
            missing_columns,
        }
    }

    /// Turn a failed check into [`KoivizError::MissingColumns`].
    pub fn into_result(self) -> Result<(), KoivizError> {
        if self.ok {
            Ok(())
        } else {
            Err(KoivizError::MissingColumns(self.missing_columns))
        }
    }
}

/// Check that an uploaded table provides every canonical column.
///
/// The classifier needs a fixed feature vector, so a table missing any of the 14 canonical
/// columns is rejected as a whole; no row is accepted on its own.
///
/// Arguments
/// ---------
/// * `records`: the lexed rows, header first; comment rows are dropped before the check
///
/// Return
/// ------
/// * [`ImportValidation`] listing exactly the canonical columns absent from the header row
pub fn validate_import<S: AsRef<str>>(records: &[Vec<S>]) -> ImportValidation {
    validate_table(&RawTable::from_records(records))
}

/// Same check on an already-built [`RawTable`].
pub fn validate_table(table: &RawTable) -> ImportValidation {
    let validation = ImportValidation::from_observed(&table.observed_fields());
    if !validation.ok {
        warn!(
            missing = ?validation.missing_columns,
            "import rejected, required columns absent"
        );
    }
    validation
}

/// Full structural check of an import: a header, at least one data row, all columns.
pub fn check_structure(table: &RawTable) -> Result<(), KoivizError> {
    if table.is_empty() {
        return Err(KoivizError::EmptyImport);
    }
    validate_table(table).into_result()
}

#[cfg(test)]
mod validator_test {
    use super::*;

    fn full_header() -> Vec<&'static str> {
        CanonicalField::ALL.iter().map(|f| f.as_str()).collect()
    }

    #[test]
    fn test_complete_header_passes() {
        let records = vec![full_header(), vec!["1"; 14]];
        let validation = validate_import(&records);
        assert!(validation.ok);
        assert!(validation.missing_columns.is_empty());
        assert_eq!(validation.into_result(), Ok(()));
    }

    #[test]
    fn test_missing_columns_reported() {
        let mut header = full_header();
        header.retain(|h| *h != "koi_depth" && *h != "koi_fpflag_ss");
        let validation = validate_import(&[header]);

        assert!(!validation.ok);
        assert_eq!(
            validation.missing_columns,
            vec![CanonicalField::Depth, CanonicalField::FpflagSs]
        );
    }

    #[test]
    fn test_aliases_count_as_observed() {
        let mut header = full_header();
        header[0] = "Orbital Period (days)";
        header[3] = "koi prad (re)";
        assert!(validate_import(&[header]).ok);
    }

    #[test]
    fn test_comment_row_is_not_a_header() {
        let records = vec![vec!["# koi_period"], full_header()];
        assert!(validate_import(&records).ok);
    }

    #[test]
    fn test_check_structure() {
        let header_only = RawTable::from_records(&[full_header()]);
        assert_eq!(check_structure(&header_only), Err(KoivizError::EmptyImport));

        let partial = RawTable::from_records(&[vec!["koi_period"], vec!["3"]]);
        match check_structure(&partial) {
            Err(KoivizError::MissingColumns(missing)) => assert_eq!(missing.len(), 13),
            other => panic!("unexpected {other:?}"),
        }
    }
}
