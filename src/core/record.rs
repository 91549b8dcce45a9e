use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::EncodeError;

/// A single input record: field name to value.
pub type Record = Map<String, Value>;

/// Input of an encode call: one record or an ordered sequence of records.
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    Single(Record),
    Many(Vec<Record>),
}

impl Records {
    /// Builds records from any serializable value.
    ///
    /// A struct (or map) becomes a single record, a sequence of them becomes
    /// many. Anything else is rejected with [`EncodeError::NotARecord`].
    ///
    /// ```
    /// use serde::Serialize;
    /// use tabular_encoder::core::record::Records;
    ///
    /// #[derive(Serialize)]
    /// struct Person {
    ///     name: String,
    ///     age: u8,
    /// }
    ///
    /// let people = vec![
    ///     Person { name: "Ada".to_string(), age: 36 },
    ///     Person { name: "Alan".to_string(), age: 41 },
    /// ];
    ///
    /// let records = Records::from_serializable(&people).unwrap();
    /// assert_eq!(records.len(), 2);
    /// ```
    pub fn from_serializable<T: Serialize + ?Sized>(item: &T) -> Result<Self, EncodeError> {
        let value = serde_json::to_value(item)?;
        Records::try_from(value)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Records::Single(_) => 1,
            Records::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrows the records as an ordered slice; a single record is a slice of one.
    pub fn as_slice(&self) -> &[Record] {
        match self {
            Records::Single(record) => std::slice::from_ref(record),
            Records::Many(records) => records,
        }
    }
}

impl From<Record> for Records {
    fn from(record: Record) -> Self {
        Records::Single(record)
    }
}

impl From<Vec<Record>> for Records {
    fn from(records: Vec<Record>) -> Self {
        Records::Many(records)
    }
}

impl From<&[Record]> for Records {
    fn from(records: &[Record]) -> Self {
        Records::Many(records.to_vec())
    }
}

impl TryFrom<Value> for Records {
    type Error = EncodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(record) => Ok(Records::Single(record)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(position, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(EncodeError::NotARecord(format!(
                        "item {} is {}",
                        position,
                        kind(&other)
                    ))),
                })
                .collect::<Result<Vec<Record>, EncodeError>>()
                .map(Records::Many),
            other => Err(EncodeError::NotARecord(format!(
                "input is {}",
                kind(&other)
            ))),
        }
    }
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

/// A value tagged by how it is written into the output.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// String, number, boolean or null.
    Scalar(Value),
    /// Nested object or array, written as compact JSON.
    Structured(Value),
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Cell::Structured(value),
            scalar => Cell::Scalar(scalar),
        }
    }
}

impl Cell {
    /// Text written into the output grid for this cell.
    ///
    /// Object keys come out sorted at every level, so equal values always
    /// encode the same. Integral floats drop their fraction: `10.0` is `10`
    /// and `-0.0` is `0`.
    pub fn render(&self) -> String {
        match self {
            Cell::Scalar(Value::String(text)) => text.clone(),
            Cell::Scalar(Value::Null) => String::new(),
            Cell::Scalar(Value::Number(number)) => render_number(number),
            Cell::Scalar(scalar) => scalar.to_string(),
            Cell::Structured(value) => canonical(value).to_string(),
        }
    }
}

// Beyond this magnitude floats are written in exponent form.
const PLAIN_FLOAT_LIMIT: f64 = 1e21;

fn render_number(number: &Number) -> String {
    match number.as_f64().filter(|_| number.is_f64()) {
        Some(float) if float == 0.0 => "0".to_string(),
        Some(float) if float.fract() == 0.0 && float.abs() < PLAIN_FLOAT_LIMIT => {
            format!("{:.0}", float)
        }
        _ => number.to_string(),
    }
}

/// Copy of `value` with object keys inserted in sorted order, whatever the
/// map ordering serde_json was built with.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, value)| (key.clone(), canonical(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}
