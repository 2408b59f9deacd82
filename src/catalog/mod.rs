//! # KOI catalog ingestion
//!
//! Everything between a raw uploaded table and the rows the rest of the crate consumes:
//!
//! - [`header`] – header text normalization and the alias table.
//! - [`canonical_row`] – the fixed 14-field [`CatalogRow`] and its default padding.
//! - [`validator`] – the all-or-nothing required-column check.
//! - [`csv_reader`] – CSV file/stream reading into a [`RawTable`].
//! - [`manual_entry`] – an editable grid of canonical rows.
//!
//! ## Row stages
//! -----------------
//! A record goes through two representations:
//!
//! 1. [`RawRecord`] – ordered `(normalized key, raw text)` pairs, exactly as uploaded
//!    except for the header normalization. The orbit mapper reads non-canonical orbital
//!    columns (`koi_sma`, `koi_eccen`, …) from here.
//! 2. [`CatalogRow`] – the fixed schema sent to the classifier.
pub mod canonical_row;
pub mod csv_reader;
pub mod header;
pub mod manual_entry;
pub mod validator;

use std::fmt;

use serde::Serialize;

pub use canonical_row::{build_canonical_row, CatalogRow};
pub use csv_reader::RawTable;
pub use header::normalize_header;
pub use validator::{validate_import, ImportValidation};

/// The 14 classifier input attributes, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CanonicalField {
    #[serde(rename = "koi_period")]
    Period,
    #[serde(rename = "koi_duration")]
    Duration,
    #[serde(rename = "koi_depth")]
    Depth,
    #[serde(rename = "koi_prad")]
    Prad,
    #[serde(rename = "koi_steff")]
    Steff,
    #[serde(rename = "koi_slogg")]
    Slogg,
    #[serde(rename = "koi_srad")]
    Srad,
    #[serde(rename = "koi_smass")]
    Smass,
    #[serde(rename = "koi_impact")]
    Impact,
    #[serde(rename = "koi_kepmag")]
    Kepmag,
    #[serde(rename = "koi_fpflag_nt")]
    FpflagNt,
    #[serde(rename = "koi_fpflag_ss")]
    FpflagSs,
    #[serde(rename = "koi_fpflag_co")]
    FpflagCo,
    #[serde(rename = "koi_fpflag_ec")]
    FpflagEc,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 14] = [
        CanonicalField::Period,
        CanonicalField::Duration,
        CanonicalField::Depth,
        CanonicalField::Prad,
        CanonicalField::Steff,
        CanonicalField::Slogg,
        CanonicalField::Srad,
        CanonicalField::Smass,
        CanonicalField::Impact,
        CanonicalField::Kepmag,
        CanonicalField::FpflagNt,
        CanonicalField::FpflagSs,
        CanonicalField::FpflagCo,
        CanonicalField::FpflagEc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Period => "koi_period",
            CanonicalField::Duration => "koi_duration",
            CanonicalField::Depth => "koi_depth",
            CanonicalField::Prad => "koi_prad",
            CanonicalField::Steff => "koi_steff",
            CanonicalField::Slogg => "koi_slogg",
            CanonicalField::Srad => "koi_srad",
            CanonicalField::Smass => "koi_smass",
            CanonicalField::Impact => "koi_impact",
            CanonicalField::Kepmag => "koi_kepmag",
            CanonicalField::FpflagNt => "koi_fpflag_nt",
            CanonicalField::FpflagSs => "koi_fpflag_ss",
            CanonicalField::FpflagCo => "koi_fpflag_co",
            CanonicalField::FpflagEc => "koi_fpflag_ec",
        }
    }

    /// Position of the field in [`CanonicalField::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolve a normalized key (output of [`normalize_header`]) to a canonical field.
    pub fn from_key(key: &str) -> Option<CanonicalField> {
        CanonicalField::ALL.into_iter().find(|f| f.as_str() == key)
    }

    /// Value substituted when the field is absent or blank.
    ///
    /// The false-positive flags and the impact parameter have a safe neutral value (`"0"`);
    /// everything else is left blank for the classifier to handle.
    pub fn default_value(&self) -> &'static str {
        match self {
            CanonicalField::Impact
            | CanonicalField::FpflagNt
            | CanonicalField::FpflagSs
            | CanonicalField::FpflagCo
            | CanonicalField::FpflagEc => "0",
            _ => "",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical column names in wire order, as sent in the classifier request.
pub fn required_columns() -> Vec<&'static str> {
    CanonicalField::ALL.iter().map(|f| f.as_str()).collect()
}

/// One uploaded record after header normalization, before any schema is applied.
///
/// Keys are normalized headers; values are the raw cell text. Duplicate keys keep their
/// input order and lookups return the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Pair normalized headers with one record's cells.
    ///
    /// Short records are padded with empty cells, extra cells without a header are dropped.
    pub fn from_parts(normalized_headers: &[String], values: &[String]) -> Self {
        let fields = normalized_headers
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), values.get(i).cloned().unwrap_or_default()))
            .collect();
        RawRecord { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Non-blank value for `key`, trimmed.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&CatalogRow> for RawRecord {
    fn from(row: &CatalogRow) -> Self {
        RawRecord {
            fields: row
                .iter()
                .map(|(f, v)| (f.as_str().to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;

    #[test]
    fn test_field_order_and_keys() {
        assert_eq!(CanonicalField::ALL.len(), 14);
        assert_eq!(CanonicalField::Period.index(), 0);
        assert_eq!(CanonicalField::FpflagEc.index(), 13);
        assert_eq!(
            CanonicalField::from_key("koi_fpflag_co"),
            Some(CanonicalField::FpflagCo)
        );
        assert_eq!(CanonicalField::from_key("koi_sma"), None);
        assert_eq!(required_columns()[9], "koi_kepmag");
    }

    #[test]
    fn test_default_values() {
        assert_eq!(CanonicalField::Impact.default_value(), "0");
        assert_eq!(CanonicalField::FpflagSs.default_value(), "0");
        assert_eq!(CanonicalField::Kepmag.default_value(), "");
        assert_eq!(CanonicalField::Period.default_value(), "");
    }

    #[test]
    fn test_raw_record_padding() {
        let headers = vec!["koi_period".to_string(), "koi_prad".to_string()];
        let record = RawRecord::from_parts(&headers, &["12.5".to_string()]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("koi_period"), Some("12.5"));
        assert_eq!(record.get("koi_prad"), Some(""));
        assert_eq!(record.get_non_empty("koi_prad"), None);
        assert_eq!(record.get("koi_sma"), None);
    }
}
