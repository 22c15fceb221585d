//! The in-memory hicsv document: ordered typed columns plus a metadata
//! mapping.

use serde_json::{Map, Value};

use super::column::{Column, ColumnData};
use crate::error::{HicsvError, Result};

/// One hicsv file in memory.
///
/// Columns keep their insertion order, which is also their on-disk order.
/// Invariants are checked on every mutating call: column names are unique and
/// all columns share one length. The first column appended to an empty
/// document establishes that length.
#[derive(Debug, Clone, Default)]
pub struct Document {
    columns: Vec<Column>,
    header: Map<String, Value>,
}

impl Document {
    /// Create an empty document with no columns and no metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, zero for a document without columns.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// True when the document holds no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All columns in on-disk order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in on-disk order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a single column by name.
    pub fn get_column(&self, name: &str) -> Result<&Column> {
        self.position(name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| HicsvError::unknown_column(name))
    }

    /// Look up several columns, returned in the order requested.
    pub fn get_columns(&self, names: &[&str]) -> Result<Vec<&Column>> {
        names.iter().map(|name| self.get_column(name)).collect()
    }

    /// Insert a column at `position`, shifting later columns right.
    pub fn insert_column(
        &mut self,
        position: usize,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<()> {
        let name = name.into();
        let data = data.into();

        if position > self.columns.len() {
            return Err(HicsvError::PositionOutOfRange {
                position,
                count: self.columns.len(),
            });
        }
        if self.position(&name).is_some() {
            return Err(HicsvError::duplicate_column(name));
        }
        if !self.columns.is_empty() && data.len() != self.row_count() {
            return Err(HicsvError::column_length_mismatch(
                name,
                self.row_count(),
                data.len(),
            ));
        }

        self.columns.insert(position, Column { name, data });
        Ok(())
    }

    /// Append a column at the end.
    ///
    /// The first column appended to an empty document may have any length and
    /// fixes the document's row count.
    pub fn append_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<ColumnData>,
    ) -> Result<()> {
        self.insert_column(self.columns.len(), name, data)
    }

    /// Replace the values of an existing column, possibly changing its kind.
    pub fn replace_column(&mut self, name: &str, data: impl Into<ColumnData>) -> Result<()> {
        let data = data.into();
        if data.len() != self.row_count() {
            return Err(HicsvError::column_length_mismatch(
                name,
                self.row_count(),
                data.len(),
            ));
        }
        let idx = self
            .position(name)
            .ok_or_else(|| HicsvError::unknown_column(name))?;
        self.columns[idx].data = data;
        Ok(())
    }

    /// Remove a column by name and return it.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let idx = self
            .position(name)
            .ok_or_else(|| HicsvError::unknown_column(name))?;
        Ok(self.columns.remove(idx))
    }

    /// Rename a column, keeping its position and values.
    pub fn rename_column(&mut self, name: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if new_name != name && self.position(&new_name).is_some() {
            return Err(HicsvError::duplicate_column(new_name));
        }
        let idx = self
            .position(name)
            .ok_or_else(|| HicsvError::unknown_column(name))?;
        self.columns[idx].name = new_name;
        Ok(())
    }

    /// Metadata mapping, in insertion order.
    #[must_use]
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    /// Mutable access to the metadata mapping.
    pub fn header_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.header
    }

    /// Look up one metadata entry.
    #[must_use]
    pub fn header_get(&self, key: &str) -> Option<&Value> {
        self.header.get(key)
    }

    /// Set one metadata entry, returning the previous value if any.
    pub fn header_set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.header.insert(key.into(), value.into())
    }

    /// Metadata keys in insertion order.
    pub fn header_keys(&self) -> impl Iterator<Item = &str> {
        self.header.keys().map(String::as_str)
    }

    /// Re-check the structural invariants.
    ///
    /// Mutating calls already enforce these, so this only fails if the
    /// document was assembled through a bug; the writer runs it before
    /// producing any output.
    pub fn validate(&self) -> Result<()> {
        let expected = self.row_count();
        for (idx, column) in self.columns.iter().enumerate() {
            if column.len() != expected {
                return Err(HicsvError::column_length_mismatch(
                    column.name.clone(),
                    expected,
                    column.len(),
                ));
            }
            if self.columns[..idx].iter().any(|c| c.name == column.name) {
                return Err(HicsvError::duplicate_column(column.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnKind;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.append_column("ints", vec![0i64, 1, 2]).unwrap();
        doc.append_column("floats", vec![0.0f64, 0.5, 1.0]).unwrap();
        doc
    }

    #[test]
    fn test_first_append_fixes_length() {
        let mut doc = Document::new();
        assert_eq!(doc.row_count(), 0);
        doc.append_column("a", vec![1i64, 2, 3, 4, 5]).unwrap();
        assert_eq!(doc.row_count(), 5);

        let err = doc.append_column("b", vec![1i64, 2, 3, 4]).unwrap_err();
        assert!(matches!(
            err,
            HicsvError::ColumnLengthMismatch {
                expected: 5,
                actual: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut doc = sample();
        let err = doc.append_column("ints", vec![9i64, 9, 9]).unwrap_err();
        assert!(matches!(err, HicsvError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_get_columns_in_requested_order() {
        let doc = sample();
        let cols = doc.get_columns(&["floats", "ints"]).unwrap();
        assert_eq!(cols[0].name, "floats");
        assert_eq!(cols[1].name, "ints");

        let err = doc.get_columns(&["ints", "missing"]).unwrap_err();
        assert!(matches!(err, HicsvError::UnknownColumn { .. }));
    }

    #[test]
    fn test_insert_column_position() {
        let mut doc = sample();
        doc.insert_column(0, "texts", vec!["a", "b", "c"]).unwrap();
        assert_eq!(doc.column_names(), vec!["texts", "ints", "floats"]);

        let err = doc.insert_column(9, "late", vec![1i64, 2, 3]).unwrap_err();
        assert!(matches!(err, HicsvError::PositionOutOfRange { .. }));
    }

    #[test]
    fn test_replace_column_changes_kind() {
        let mut doc = sample();
        doc.replace_column("ints", vec!["x", "y", "z"]).unwrap();
        assert_eq!(doc.get_column("ints").unwrap().kind(), ColumnKind::Text);

        let err = doc.replace_column("ints", vec![1i64]).unwrap_err();
        assert!(matches!(err, HicsvError::ColumnLengthMismatch { .. }));
    }

    #[test]
    fn test_remove_and_rename() {
        let mut doc = sample();
        doc.rename_column("ints", "integers").unwrap();
        assert_eq!(doc.column_names(), vec!["integers", "floats"]);

        let err = doc.rename_column("integers", "floats").unwrap_err();
        assert!(matches!(err, HicsvError::DuplicateColumn { .. }));

        let removed = doc.remove_column("integers").unwrap();
        assert_eq!(removed.name, "integers");
        assert_eq!(doc.column_names(), vec!["floats"]);

        let err = doc.remove_column("integers").unwrap_err();
        assert!(matches!(err, HicsvError::UnknownColumn { .. }));
    }

    #[test]
    fn test_header_access() {
        let mut doc = sample();
        assert!(doc.header_get("title").is_none());
        doc.header_set("title", "run 42");
        doc.header_set("shots", 1000);
        assert_eq!(doc.header_get("title"), Some(&Value::from("run 42")));
        assert_eq!(
            doc.header_keys().collect::<Vec<_>>(),
            vec!["title", "shots"]
        );
    }

    #[test]
    fn test_validate_clean_document() {
        assert!(sample().validate().is_ok());
    }
}
