// ============================================================
// TABLE TYPES
// ============================================================
// In-memory representation of parsed tabular data. One table is
// built per conversion request and discarded after rendering.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::GenericType;

/// A single row: header name -> raw value. A header may be absent from
/// the map when the source row was shorter than the header line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Row index (0-based, data rows only)
    pub index: usize,

    /// Values keyed by original header name
    pub values: HashMap<String, String>,

    /// Number of fields actually present in the source row. Kept
    /// separately because the map collapses duplicate headers.
    pub field_count: usize,
}

impl TableRow {
    pub fn new(index: usize, values: HashMap<String, String>, field_count: usize) -> Self {
        Self {
            index,
            values,
            field_count,
        }
    }

    /// Raw value for a header, if present
    pub fn get(&self, header: &str) -> Option<&str> {
        self.values.get(header).map(|v| v.as_str())
    }
}

/// An ordered table of named columns. Header order is significant and
/// is preserved through DDL and DML rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl DataTable {
    pub fn new(headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// All values of one column in row order; `None` for rows where the
    /// header is absent. Absence and empty string are both NULL-equivalent.
    pub fn column_values<'a>(&'a self, header: &str) -> Vec<Option<&'a str>> {
        self.rows.iter().map(|r| r.get(header)).collect()
    }

    /// Non-empty trimmed values of one column, bounded by `limit`
    pub fn non_empty_values<'a>(&'a self, header: &str, limit: usize) -> Vec<&'a str> {
        self.rows
            .iter()
            .filter_map(|r| r.get(header))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .take(limit)
            .collect()
    }
}

/// Per-column inference result surfaced by the preview operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Header as it appeared in the source
    pub original_name: String,

    /// Sanitized (and collision-disambiguated) SQL identifier
    pub sanitized_name: String,

    /// Inferred generic type
    pub generic_type: GenericType,

    /// Up to 3 sample non-empty raw values
    pub samples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize, pairs: &[(&str, &str)]) -> TableRow {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let count = pairs.len();
        TableRow::new(index, values, count)
    }

    #[test]
    fn test_column_values_with_missing_keys() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![row(0, &[("a", "1"), ("b", "x")]), row(1, &[("a", "2")])],
        );

        assert_eq!(table.column_values("b"), vec![Some("x"), None]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_non_empty_values_trims_and_bounds() {
        let table = DataTable::new(
            vec!["a".into()],
            vec![
                row(0, &[("a", " 1 ")]),
                row(1, &[("a", "")]),
                row(2, &[("a", "2")]),
                row(3, &[("a", "3")]),
            ],
        );

        assert_eq!(table.non_empty_values("a", 2), vec!["1", "2"]);
        assert_eq!(table.non_empty_values("a", 10), vec!["1", "2", "3"]);
    }
}
