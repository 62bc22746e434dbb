use std::collections::BTreeSet;
use std::io::Write;

use serde_json::Value;

use crate::io::{Format, IoError};

/// Writes rows in the requested format. YAML output is not part of the report
/// surface; report artifacts are CSV, JSON, or JSONL.
pub fn write_values<W: Write>(writer: W, format: Format, values: &[Value]) -> Result<(), IoError> {
    match format {
        Format::Json => write_json(writer, values),
        Format::Jsonl => write_jsonl(writer, values),
        Format::Csv => write_csv(writer, values),
        Format::Yaml => Err(IoError::UnsupportedFormat {
            format: "yaml output".to_string(),
        }),
    }
}

fn write_json<W: Write>(writer: W, values: &[Value]) -> Result<(), IoError> {
    serde_json::to_writer(writer, values)?;
    Ok(())
}

fn write_jsonl<W: Write>(mut writer: W, values: &[Value]) -> Result<(), IoError> {
    for value in values {
        serde_json::to_writer(&mut writer, value)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

fn write_csv<W: Write>(writer: W, values: &[Value]) -> Result<(), IoError> {
    let mut headers = BTreeSet::new();
    for value in values {
        if let Value::Object(map) = value {
            headers.extend(map.keys().cloned());
        }
    }
    let headers: Vec<String> = headers.into_iter().collect();

    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    if !headers.is_empty() {
        csv_writer.write_record(&headers)?;
    }
    for (index, value) in values.iter().enumerate() {
        let Value::Object(map) = value else {
            return Err(IoError::RowNotObject { index });
        };
        let row: Vec<String> = headers
            .iter()
            .map(|key| map.get(key).map(stringify_csv_value).unwrap_or_default())
            .collect();
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn stringify_csv_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
