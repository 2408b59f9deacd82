//! # CSV import surface
//!
//! Reads an uploaded KOI table into a [`RawTable`]: one header row followed by data rows,
//! every cell kept as text.
//!
//! ## Input conventions
//! -----------------
//! - UTF-8, with or without a byte-order mark.
//! - A row whose first cell starts with `#` (after trimming) is a comment and is dropped.
//!   NASA Exoplanet Archive exports open with dozens of them.
//! - Empty lines and rows made only of blank cells are skipped.
//! - The first remaining row is the header; rows may be ragged (short rows are padded with
//!   blanks when paired with the header, extra cells are ignored).
//!
//! Lexing is delegated to [`csv`]; nothing here interprets numbers.
//!
//! ## See also
//! ------------
//! * [`normalize_header`](crate::catalog::header::normalize_header) – applied to the header row.
//! * [`validate_import`](crate::catalog::validator::validate_import) – the required-column check.
use std::{collections::BTreeSet, fs::File, io::Read};

use camino::Utf8Path;
use tracing::debug;

use super::{
    canonical_row::CatalogRow, header::normalize_headers, CanonicalField, RawRecord,
};
use crate::koiviz_errors::KoivizError;

/// An uploaded table after comment filtering: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    normalized_headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn is_comment_row<S: AsRef<str>>(record: &[S]) -> bool {
    record.first().is_some_and(|cell| {
        cell.as_ref()
            .trim_start_matches('\u{feff}')
            .trim()
            .starts_with('#')
    })
}

fn is_blank_row<S: AsRef<str>>(record: &[S]) -> bool {
    record.iter().all(|cell| cell.as_ref().trim().is_empty())
}

impl RawTable {
    /// Build a table from already-lexed records (header first).
    ///
    /// Comment and blank rows are removed before the header is picked, so a file that only
    /// contains comments yields an empty table.
    pub fn from_records<S: AsRef<str>>(records: &[Vec<S>]) -> Self {
        let mut kept = records
            .iter()
            .filter(|r| !is_comment_row(r) && !is_blank_row(r))
            .map(|r| r.iter().map(|c| c.as_ref().to_string()).collect::<Vec<_>>());

        let Some(headers) = kept.next() else {
            return RawTable::default();
        };
        let rows: Vec<Vec<String>> = kept.collect();

        RawTable {
            normalized_headers: normalize_headers(&headers),
            headers,
            rows,
        }
    }

    /// Lex CSV text from any reader.
    ///
    /// Return
    /// ------
    /// * the table, or a [`KoivizError::CsvError`] when the stream is not valid CSV/UTF-8
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, KoivizError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let records = csv_reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<Result<Vec<_>, _>>()?;

        let table = RawTable::from_records(&records);
        debug!(
            lexed = records.len(),
            data_rows = table.rows.len(),
            "CSV table lexed"
        );
        Ok(table)
    }

    /// Read a CSV file from disk.
    pub fn from_path(path: &Utf8Path) -> Result<Self, KoivizError> {
        let file = File::open(path)?;
        RawTable::from_reader(file)
    }

    /// Header cells exactly as uploaded.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Header cells after [`normalize_header`](crate::catalog::header::normalize_header).
    pub fn normalized_headers(&self) -> &[String] {
        &self.normalized_headers
    }

    /// Data rows as uploaded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn has_header(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Canonical fields that appear among the normalized headers.
    pub fn observed_fields(&self) -> BTreeSet<CanonicalField> {
        self.normalized_headers
            .iter()
            .filter_map(|h| CanonicalField::from_key(h))
            .collect()
    }

    /// Each data row paired with the normalized headers.
    pub fn raw_records(&self) -> Vec<RawRecord> {
        self.rows
            .iter()
            .map(|row| RawRecord::from_parts(&self.normalized_headers, row))
            .collect()
    }

    /// Each data row in the fixed classifier schema, defaults applied.
    pub fn canonical_rows(&self) -> Vec<CatalogRow> {
        self.raw_records()
            .iter()
            .map(CatalogRow::from_raw_record)
            .collect()
    }
}

#[cfg(test)]
mod csv_reader_test {
    use super::*;

    const NASA_EXPORT: &str = "\u{feff}# This file was produced by the NASA Exoplanet Archive\n\
# COLUMN koi_period: Orbital Period [days]\n\
koi_period,Planet Radius (Re),koi_impact\n\
\n\
9.488,2.26,0.146\n\
  # trailing note\n\
54.418,2.83,\n";

    #[test]
    fn test_from_reader_filters_comments() {
        let table = RawTable::from_reader(NASA_EXPORT.as_bytes()).unwrap();

        assert_eq!(table.headers()[1], "Planet Radius (Re)");
        assert_eq!(
            table.normalized_headers(),
            &["koi_period", "koi_prad", "koi_impact"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1], vec!["54.418", "2.83", ""]);
    }

    #[test]
    fn test_canonical_rows_are_padded() {
        let table = RawTable::from_reader(NASA_EXPORT.as_bytes()).unwrap();
        let rows = table.canonical_rows();

        assert_eq!(rows[0].get(CanonicalField::Impact), "0.146");
        assert_eq!(rows[1].get(CanonicalField::Impact), "0");
        assert_eq!(rows[1].get(CanonicalField::Prad), "2.83");
    }

    #[test]
    fn test_ragged_rows() {
        let csv = "koi_period,koi_prad,koi_sma\n10,2\n365,1,5,extra\n";
        let table = RawTable::from_reader(csv.as_bytes()).unwrap();
        let records = table.raw_records();

        assert_eq!(records[0].get("koi_sma"), Some(""));
        assert_eq!(records[1].get("koi_sma"), Some("5"));
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_only_comments_is_empty() {
        let table = RawTable::from_reader("# a\n# b\n".as_bytes()).unwrap();
        assert!(!table.has_header());
        assert!(table.is_empty());
    }

    #[test]
    fn test_observed_fields() {
        let table = RawTable::from_records(&[vec!["koi_period", "Teff", "kepid"]]);
        let observed = table.observed_fields();
        assert_eq!(observed.len(), 2);
        assert!(observed.contains(&CanonicalField::Steff));
    }
}
