//! Editable grid of canonical rows, for candidates typed in by hand instead of uploaded.
//!
//! Edits go through [`CatalogRow::set`], which re-applies the default padding of the edited
//! field. The grid is never re-validated: its schema is the canonical one by construction.
use super::{canonical_row::CatalogRow, CanonicalField};
use crate::koiviz_errors::KoivizError;

#[derive(Debug, Clone, PartialEq)]
pub struct ManualEntryTable {
    rows: Vec<CatalogRow>,
}

impl Default for ManualEntryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualEntryTable {
    /// A grid holding one padded, otherwise empty row.
    pub fn new() -> Self {
        ManualEntryTable {
            rows: vec![CatalogRow::default()],
        }
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Edit one cell.
    ///
    /// Arguments
    /// ---------
    /// * `row_index`: row to edit
    /// * `field`: column to edit
    /// * `value`: new text; blank text falls back to the field default
    ///
    /// Return
    /// ------
    /// * [`KoivizError::RowIndexOutOfRange`] if `row_index` does not exist
    pub fn set_cell(
        &mut self,
        row_index: usize,
        field: CanonicalField,
        value: &str,
    ) -> Result<(), KoivizError> {
        let len = self.rows.len();
        let row = self
            .rows
            .get_mut(row_index)
            .ok_or(KoivizError::RowIndexOutOfRange {
                index: row_index,
                len,
            })?;
        row.set(field, value);
        Ok(())
    }

    /// Append a padded empty row and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(CatalogRow::default());
        self.rows.len() - 1
    }

    /// Replace the grid with `row_count` padded empty rows.
    pub fn reset(&mut self, row_count: usize) {
        self.rows = vec![CatalogRow::default(); row_count];
    }

    /// Replace the grid content wholesale (e.g. after an import).
    pub fn set_rows(&mut self, rows: Vec<CatalogRow>) {
        self.rows = rows;
    }
}
