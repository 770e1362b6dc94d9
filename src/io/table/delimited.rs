use super::Dataset;
use crate::io::{Error, Format};
use serde_json::{Map, Number, Value};
use std::io::{BufRead, Write};

/// Reads CSV with a header row. Cells become numbers when they parse as
/// such, `null` when empty, and strings otherwise.
pub fn read<R: BufRead>(reader: R) -> Result<Dataset, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut dataset = Dataset::new(headers.clone());

    for result in reader.records() {
        let record = result?;
        let row: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), infer_cell(cell)))
            .collect();
        dataset.push_row(row);
    }

    Ok(dataset)
}

pub fn write<W: Write>(writer: W, dataset: &Dataset) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        let cells = dataset
            .columns()
            .iter()
            .map(|col| row.get(col).map(render_cell).unwrap_or_default());
        writer.write_record(cells)?;
    }

    writer
        .flush()
        .map_err(|e| Error::write(Format::Csv, e.to_string()))
}

fn infer_cell(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Some(n) = cell.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
