use super::Dataset;
use crate::io::{Error, Format};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::{BufRead, Write};

pub fn read<R: BufRead>(reader: R) -> Result<Dataset, Error> {
    let value: Value = serde_json::from_reader(reader)?;

    let Value::Array(items) = value else {
        return Err(Error::parse(
            Format::Json,
            1,
            "expected an array of records at the top level",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(map) => rows.push(map),
            other => {
                return Err(Error::parse(
                    Format::Json,
                    0,
                    format!("record {index} is {}, expected an object", kind(&other)),
                ));
            }
        }
    }

    Ok(Dataset::from_records(rows))
}

/// Writes records as a pretty-printed array with four-space indentation.
/// Every row lists every column, in column order; absent cells are `null`.
pub fn write<W: Write>(mut writer: W, dataset: &Dataset) -> Result<(), Error> {
    let records: Vec<Map<String, Value>> = dataset
        .rows()
        .iter()
        .map(|row| {
            dataset
                .columns()
                .iter()
                .map(|col| (col.clone(), row.get(col).cloned().unwrap_or(Value::Null)))
                .collect()
        })
        .collect();

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records
        .serialize(&mut ser)
        .map_err(|e| Error::write(Format::Json, e.to_string()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
