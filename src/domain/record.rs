use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

static ABSENT: FieldValue = FieldValue::Absent;

/// Tagged scalar carried by one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    Absent,
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::Absent => "absent",
        }
    }

    /// Present means non-null and, for text, non-empty.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::String(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// Canonical text rendering used by format checks and predicates.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(text) => Some(text.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Decimal(value) => Some(value.to_string()),
            Self::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
            Self::Absent => None,
        }
    }

    /// Maps a JSON scalar into the tagged model. Booleans arrive as text the
    /// same way CSV carries them; non-scalars keep their compact JSON literal.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(flag) => Self::String(flag.to_string()),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => Self::Integer(integer),
                None => number
                    .as_f64()
                    .map(Self::Decimal)
                    .unwrap_or_else(|| Self::String(number.to_string())),
            },
            Value::String(text) => Self::String(text.clone()),
            other => Self::String(
                serde_json::to_string(other).unwrap_or_else(|_| "null".to_string()),
            ),
        }
    }
}

/// One input row keyed by field name. Immutable during validation; fields not
/// declared in any spec are carried but never inspected by rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
    identifier: Option<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_object(map: &Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (key, value) in map {
            record.set(key.clone(), FieldValue::from_json(value));
        }
        record
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> &FieldValue {
        self.values.get(field).unwrap_or(&ABSENT)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
