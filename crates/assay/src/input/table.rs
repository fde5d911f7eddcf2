//! In-memory row table handed over by the decoding collaborator.

use indexmap::{IndexMap, IndexSet};

use crate::error::{AssayError, Result};
use super::value::Value;

/// A single decoded row: column name to raw value.
pub type Row = IndexMap<String, Value>;

static NULL: Value = Value::Null;

/// Represents decoded tabular data.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    /// Column names in first-seen order across all rows.
    headers: Vec<String>,
    /// Row records (row-major order).
    rows: Vec<Row>,
}

impl RowTable {
    /// Create a table from decoded rows.
    ///
    /// The column set is the union of keys over every row. A row that lacks
    /// a column simply reads as missing for that column.
    pub fn new(rows: Vec<Row>) -> Self {
        let mut headers: IndexSet<String> = IndexSet::new();
        for row in &rows {
            for key in row.keys() {
                if !headers.contains(key) {
                    headers.insert(key.clone());
                }
            }
        }

        Self {
            headers: headers.into_iter().collect(),
            rows,
        }
    }

    /// Parse a JSON array of flat objects.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(&value)
    }

    /// Build a table from an already-parsed JSON array of flat objects.
    pub fn from_json_value(json: &serde_json::Value) -> Result<Self> {
        let items = json.as_array().ok_or_else(|| {
            AssayError::InvalidInput("expected a JSON array of row objects".to_string())
        })?;

        let mut rows = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let object = item.as_object().ok_or_else(|| {
                AssayError::InvalidInput(format!("row {} is not an object", index))
            })?;

            let mut row = Row::with_capacity(object.len());
            for (key, cell) in object {
                let value = match cell {
                    serde_json::Value::Null => Value::Null,
                    serde_json::Value::Bool(b) => Value::Bool(*b),
                    serde_json::Value::Number(n) => {
                        n.as_f64().map(Value::Number).unwrap_or(Value::Null)
                    }
                    serde_json::Value::String(s) => Value::String(s.clone()),
                    _ => {
                        return Err(AssayError::InvalidInput(format!(
                            "row {}, column '{}': nested values are not supported",
                            index, key
                        )))
                    }
                };
                row.insert(key.clone(), value);
            }
            rows.push(row);
        }

        Ok(Self::new(rows))
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    /// All rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get all values for a column, one per row. Absent cells read as null.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |row| row.get(name).unwrap_or(&NULL))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

impl From<Vec<Row>> for RowTable {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_union_in_first_seen_order() {
        let table = RowTable::from_json_str(
            r#"[{"a": 1, "b": "x"}, {"b": "y", "c": true}]"#,
        )
        .unwrap();

        assert_eq!(table.column_names(), &["a", "b", "c"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_absent_cell_reads_as_null() {
        let table = RowTable::from_json_str(r#"[{"a": 1}, {"b": 2}]"#).unwrap();
        let values: Vec<&Value> = table.column_values("a").collect();

        assert_eq!(values, vec![&Value::Number(1.0), &Value::Null]);
        assert_eq!(table.get(1, "a"), None);
    }

    #[test]
    fn test_rejects_non_array() {
        let err = RowTable::from_json_str(r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, AssayError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_nested_values() {
        let err = RowTable::from_json_str(r#"[{"a": [1, 2]}]"#).unwrap_err();
        assert!(matches!(err, AssayError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = RowTable::from_json_str("[{").unwrap_err();
        assert!(matches!(err, AssayError::Json(_)));
    }
}
