mod delimited;
mod json;

use super::{Error, Format};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

/// A row-oriented table of JSON values with a fixed column order.
///
/// Rows may omit columns; readers of a missing cell see `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Map<String, Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a dataset from records, collecting columns in first-seen order.
    pub fn from_records(rows: Vec<Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Map<String, Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Appends a row; keys not yet known become new trailing columns.
    pub fn push_row(&mut self, row: Map<String, Value>) {
        for key in row.keys() {
            if !self.has_column(key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Cell value, `None` when the row lacks the column or does not exist.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }
}

pub fn read_dataset<R: BufRead>(reader: R, format: Format) -> Result<Dataset, Error> {
    match format {
        Format::Json => json::read(reader),
        Format::Csv => delimited::read(reader),
    }
}

pub fn write_dataset<W: Write>(writer: W, dataset: &Dataset, format: Format) -> Result<(), Error> {
    match format {
        Format::Json => json::write(writer, dataset),
        Format::Csv => delimited::write(writer, dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn from_records_collects_columns_in_first_seen_order() {
        let ds = Dataset::from_records(vec![
            record(json!({"composition": "Fe", "id": 1})),
            record(json!({"id": 2, "hardness": 310.0})),
        ]);
        assert_eq!(ds.columns(), ["composition", "id", "hardness"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cell(1, "hardness"), Some(&json!(310.0)));
        assert_eq!(ds.cell(1, "composition"), None);
        assert_eq!(ds.cell(5, "id"), None);
    }

    #[test]
    fn push_row_extends_columns() {
        let mut ds = Dataset::new(vec!["a".to_string()]);
        ds.push_row(record(json!({"a": 1, "b": 2})));
        assert_eq!(ds.columns(), ["a", "b"]);
        assert!(ds.has_column("b"));
    }

    #[test]
    fn csv_to_json_keeps_column_order() {
        let csv = "composition,id\nFe0.5Ni0.5,7\n";
        let ds = read_dataset(csv.as_bytes(), Format::Csv).unwrap();

        let mut out = Vec::new();
        write_dataset(&mut out, &ds, Format::Json).unwrap();
        let text = String::from_utf8(out).unwrap();
        let composition_at = text.find("\"composition\"").unwrap();
        let id_at = text.find("\"id\"").unwrap();
        assert!(composition_at < id_at);
        assert!(text.contains("\n        \"id\": 7"));
    }
}
