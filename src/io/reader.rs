use std::io::{BufRead, BufReader, Read};

use serde_json::{Map, Value};

use crate::domain::record::Record;
use crate::io::{Format, IoError};

/// Reads a whole input stream into JSON values, one per row. A single
/// top-level JSON/YAML document that is not an array counts as one row.
pub fn read_values<R: Read>(reader: R, format: Format) -> Result<Vec<Value>, IoError> {
    match format {
        Format::Json => read_json(reader),
        Format::Jsonl => read_jsonl(reader),
        Format::Csv => read_csv(reader),
        Format::Yaml => read_yaml(reader),
    }
}

/// Reads rows and converts them to validation records. Every row must be an
/// object; records are tagged with their 1-based row number so findings can
/// point back at the input.
pub fn read_records<R: Read>(reader: R, format: Format) -> Result<Vec<Record>, IoError> {
    let values = read_values(reader, format)?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        let Value::Object(map) = value else {
            return Err(IoError::RowNotObject { index });
        };
        records.push(Record::from_object(map).with_identifier((index + 1).to_string()));
    }
    Ok(records)
}

fn read_json<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let value: Value = serde_json::from_reader(reader)?;
    Ok(match value {
        Value::Array(items) => items,
        single => vec![single],
    })
}

fn read_jsonl<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut values = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        values.push(serde_json::from_str(trimmed)?);
    }
    Ok(values)
}

/// CSV rows become objects of string cells, exactly as the upstream filings
/// arrive; typing is the engine's concern, not the reader's.
fn read_csv<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut out = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        let mut map = Map::new();
        for (index, cell) in row.iter().enumerate() {
            let key = headers
                .get(index)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| format!("col_{index}"));
            map.insert(key, Value::String(cell.to_string()));
        }
        out.push(Value::Object(map));
    }
    Ok(out)
}

fn read_yaml<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let yaml_value: serde_yaml::Value = serde_yaml::from_reader(reader)?;
    let json_value = serde_json::to_value(yaml_value)?;
    Ok(match json_value {
        Value::Array(items) => items,
        single => vec![single],
    })
}
