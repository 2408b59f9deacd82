use serde::{ser::SerializeMap, Serialize, Serializer};

use super::{header::normalize_header, CanonicalField, RawRecord};

/// A KOI row in the fixed classifier schema.
///
/// Always holds exactly one value per [`CanonicalField`]; values are numeric text or the
/// field's [default](CanonicalField::default_value). Serializes as a JSON object whose keys
/// are the 14 canonical names in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    values: [String; 14],
}

impl Default for CatalogRow {
    fn default() -> Self {
        CatalogRow {
            values: CanonicalField::ALL.map(|f| f.default_value().to_string()),
        }
    }
}

impl CatalogRow {
    /// Build a row from a normalized record, padding absent or blank fields.
    pub fn from_raw_record(record: &RawRecord) -> Self {
        CatalogRow {
            values: CanonicalField::ALL.map(|f| padded(f, record.get(f.as_str()))),
        }
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        &self.values[field.index()]
    }

    /// Overwrite one field, re-applying the default when the new value is blank.
    ///
    /// This is the only mutation a row ever sees (manual edits); it pads but never validates.
    pub fn set(&mut self, field: CanonicalField, value: &str) {
        self.values[field.index()] = padded(field, Some(value));
    }

    /// `(field, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        CanonicalField::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }

    /// Lenient numeric view of a field: blank or unparseable text reads as `None`.
    pub fn numeric(&self, field: CanonicalField) -> Option<f64> {
        crate::conversion::parse_lenient(self.get(field))
    }
}

impl Serialize for CatalogRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}

fn padded(field: CanonicalField, value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => field.default_value().to_string(),
    }
}

/// Build the canonical row for one uploaded record.
///
/// Arguments
/// ---------
/// * `headers`: the raw header cells (normalized here)
/// * `raw_values`: the record's cells, position-aligned with `headers`
///
/// Return
/// ------
/// * A [`CatalogRow`] where every canonical field takes the value under the matching
///   normalized header when it is present and non-empty, and its default otherwise.
pub fn build_canonical_row<H, V>(headers: &[H], raw_values: &[V]) -> CatalogRow
where
    H: AsRef<str>,
    V: AsRef<str>,
{
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h.as_ref())).collect();
    let values: Vec<String> = raw_values.iter().map(|v| v.as_ref().to_string()).collect();
    CatalogRow::from_raw_record(&RawRecord::from_parts(&normalized, &values))
}

#[cfg(test)]
mod canonical_row_test {
    use super::*;

    #[test]
    fn test_build_with_aliases_and_defaults() {
        let headers = ["Period (days)", "koi_prad", "koi_impact", "koi_kepmag"];
        let values = ["9.48", " 2.26 ", "", "15.3"];

        let row = build_canonical_row(&headers, &values);

        assert_eq!(row.get(CanonicalField::Period), "9.48");
        assert_eq!(row.get(CanonicalField::Prad), "2.26");
        assert_eq!(row.get(CanonicalField::Impact), "0");
        assert_eq!(row.get(CanonicalField::Kepmag), "15.3");
        assert_eq!(row.get(CanonicalField::FpflagNt), "0");
        assert_eq!(row.get(CanonicalField::Duration), "");
    }

    #[test]
    fn test_set_repads() {
        let mut row = CatalogRow::default();
        row.set(CanonicalField::FpflagCo, "1");
        assert_eq!(row.get(CanonicalField::FpflagCo), "1");
        row.set(CanonicalField::FpflagCo, "  ");
        assert_eq!(row.get(CanonicalField::FpflagCo), "0");
        row.set(CanonicalField::Kepmag, "");
        assert_eq!(row.get(CanonicalField::Kepmag), "");
    }

    #[test]
    fn test_serialize_has_exactly_canonical_keys() {
        let row = build_canonical_row(&["koi_period"], &["3.5"]);
        let json = serde_json::to_value(&row).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 14);
        assert_eq!(obj["koi_period"], "3.5");
        assert_eq!(obj["koi_fpflag_ec"], "0");
        assert_eq!(obj["koi_srad"], "");
    }

    #[test]
    fn test_numeric_view() {
        let row = build_canonical_row(&["koi_period", "koi_depth"], &["12.0", "n/a"]);
        assert_eq!(row.numeric(CanonicalField::Period), Some(12.0));
        assert_eq!(row.numeric(CanonicalField::Depth), None);
        assert_eq!(row.numeric(CanonicalField::Impact), Some(0.0));
    }
}
