use std::collections::HashSet;

use log::debug;

use super::TableError;
use super::model::{Column, Table};

// ---------------------------------------------------------------------------
// Column pruning: all-or-nothing removal / selection of named columns
// ---------------------------------------------------------------------------

impl Table {
    /// Remove the named columns in place.
    ///
    /// Every name must be present. If any is absent the table is left
    /// untouched and the error lists all absent names. Repeated names are
    /// removed once.
    pub fn drop_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, TableError> {
        let missing = self.missing_columns(names);
        if !missing.is_empty() {
            return Err(TableError::MissingColumn { columns: missing });
        }

        let to_drop: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        let before = self.width();
        self.columns_mut()
            .retain(|c| !to_drop.contains(c.name.as_str()));
        debug!("Dropped {} of {before} columns", before - self.width());
        Ok(self)
    }

    /// Keep only the named columns, in the order given.
    ///
    /// Same all-or-nothing rule as [`Table::drop_columns`]. Repeated names
    /// are kept once, at their first position.
    pub fn select_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<&mut Self, TableError> {
        let missing = self.missing_columns(names);
        if !missing.is_empty() {
            return Err(TableError::MissingColumn { columns: missing });
        }

        let mut remaining: Vec<Option<Column>> =
            std::mem::take(self.columns_mut()).into_iter().map(Some).collect();
        let mut selected = Vec::with_capacity(names.len());
        for name in names.iter().map(AsRef::as_ref) {
            let found = remaining
                .iter()
                .position(|c| matches!(c, Some(column) if column.name == name));
            if let Some(column) = found.and_then(|idx| remaining[idx].take()) {
                selected.push(column);
            }
        }
        *self.columns_mut() = selected;
        Ok(self)
    }
}
