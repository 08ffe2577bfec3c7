//! JSON decoding for API payloads.
//!
//! Records are decoded from a borrowed [`serde_json::Value`] by explicit
//! per-record functions. Each accepted wire representation is tried in a fixed
//! order and the result is either a complete record or a [`DecodeError`];
//! nothing is ever partially filled in.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors produced while mapping JSON onto domain records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The body could not be parsed as JSON at all.
    #[error("Response body is not valid JSON: {0}")]
    InvalidJson(String),

    /// The value has the wrong top-level JSON kind.
    #[error("Expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    /// A required key is absent.
    #[error("Missing required field '{field}' (expected {expected})")]
    MissingField {
        field: &'static str,
        expected: &'static str,
    },

    /// A key is present but holds a value of the wrong shape.
    #[error("Invalid value for field '{field}': expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// An element of a list failed to decode.
    #[error("Invalid element {index} of {list}: {source}")]
    Element {
        list: &'static str,
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Walks through nested [`DecodeError::Element`] wrappers to the failure
    /// that started it.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Element { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// A record that can be built from an untyped JSON value.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self, DecodeError>;
}

/// Parses raw bytes into a JSON value.
pub fn parse_json(bytes: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::InvalidJson(e.to_string()))
}

/// Decodes a top-level JSON array, element by element.
///
/// The first element that fails aborts the whole list and is reported with
/// its position.
pub fn decode_list<T: FromJson>(value: &Value, list: &'static str) -> Result<Vec<T>, DecodeError> {
    let items = value.as_array().ok_or(DecodeError::UnexpectedShape {
        expected: "a JSON array",
        found: kind_of(value),
    })?;
    decode_elements(items, list)
}

pub(crate) fn decode_elements<T: FromJson>(
    items: &[Value],
    list: &'static str,
) -> Result<Vec<T>, DecodeError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            T::from_json(item).map_err(|e| DecodeError::Element {
                list,
                index,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Human name of a JSON value's kind, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn expect_object<'a>(
    value: &'a Value,
    expected: &'static str,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or(DecodeError::UnexpectedShape {
        expected,
        found: kind_of(value),
    })
}

pub(crate) fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, DecodeError> {
    const EXPECTED: &str = "a string";
    match obj.get(field) {
        None => Err(DecodeError::MissingField { field, expected: EXPECTED }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeError::InvalidField { field, expected: EXPECTED }),
    }
}

pub(crate) fn optional_str(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DecodeError::InvalidField {
            field,
            expected: "a string or null",
        }),
    }
}

pub(crate) fn required_int(obj: &Map<String, Value>, field: &'static str) -> Result<i64, DecodeError> {
    const EXPECTED: &str = "an integer";
    match obj.get(field) {
        None => Err(DecodeError::MissingField { field, expected: EXPECTED }),
        Some(Value::Number(n)) => integral(n).ok_or(DecodeError::InvalidField { field, expected: EXPECTED }),
        Some(_) => Err(DecodeError::InvalidField { field, expected: EXPECTED }),
    }
}

/// Integer value of a JSON number, including whole floats such as `1.4e9`.
fn integral(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let f = n.as_f64()?;
        // 2^63 is the first float past i64::MAX.
        let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
        (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
    })
}

/// Decodes a timestamp that the API may send as a number or a numeric string.
///
/// Accepted, in order: JSON number with no fractional part, string holding a
/// base-10 integer, absent key, `null`. Anything else is an error naming the field.
pub(crate) fn flexible_int(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, DecodeError> {
    let invalid = DecodeError::InvalidField {
        field,
        expected: "an integer or numeric string",
    };
    match obj.get(field) {
        Some(Value::Number(n)) => integral(n).map(Some).ok_or(invalid),
        Some(Value::String(s)) => s.parse::<i64>().map(Some).map_err(|_| invalid),
        None | Some(Value::Null) => Ok(None),
        Some(_) => Err(invalid),
    }
}

pub(crate) fn required_str_list(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, DecodeError> {
    const EXPECTED: &str = "an array of strings";
    let items = match obj.get(field) {
        None => return Err(DecodeError::MissingField { field, expected: EXPECTED }),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DecodeError::InvalidField { field, expected: EXPECTED }),
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            _ => Err(DecodeError::Element {
                list: field,
                index,
                source: Box::new(DecodeError::UnexpectedShape {
                    expected: "a string",
                    found: kind_of(item),
                }),
            }),
        })
        .collect()
}

/// Wires a [`FromJson`] record into serde via `#[serde(try_from = "serde_json::Value")]`.
macro_rules! impl_try_from_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TryFrom<serde_json::Value> for $ty {
                type Error = $crate::decode::DecodeError;

                fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                    <$ty as $crate::decode::FromJson>::from_json(&value)
                }
            }
        )+
    };
}

pub(crate) use impl_try_from_value;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_flexible_int_accepts_number_and_string() {
        let o = obj(json!({ "a": 1425480480, "b": "1425480480", "c": "-42", "d": "+7" }));
        assert_eq!(flexible_int(&o, "a").unwrap(), Some(1425480480));
        assert_eq!(flexible_int(&o, "b").unwrap(), Some(1425480480));
        assert_eq!(flexible_int(&o, "c").unwrap(), Some(-42));
        assert_eq!(flexible_int(&o, "d").unwrap(), Some(7));
    }

    #[test]
    fn test_flexible_int_accepts_whole_floats() {
        let o = obj(json!({ "a": 1425480480.0, "b": -600.0 }));
        assert_eq!(flexible_int(&o, "a").unwrap(), Some(1425480480));
        assert_eq!(flexible_int(&o, "b").unwrap(), Some(-600));

        let parsed = parse_json(br#"{"fajr": 1.4e9}"#).unwrap();
        assert_eq!(flexible_int(parsed.as_object().unwrap(), "fajr").unwrap(), Some(1_400_000_000));
    }

    #[test]
    fn test_flexible_int_rejects_out_of_range_numbers() {
        let parsed = parse_json(br#"{"big": 9223372036854775808, "huge": 1e19, "tiny": -1e19}"#).unwrap();
        let o = parsed.as_object().unwrap();
        for field in ["big", "huge", "tiny"] {
            assert!(
                matches!(flexible_int(o, field), Err(DecodeError::InvalidField { .. })),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn test_flexible_int_absent_and_null() {
        let o = obj(json!({ "n": null }));
        assert_eq!(flexible_int(&o, "n").unwrap(), None);
        assert_eq!(flexible_int(&o, "missing").unwrap(), None);
    }

    #[test]
    fn test_flexible_int_rejects_other_shapes() {
        let o = obj(json!({
            "bool": true,
            "obj": {},
            "text": "12:30",
            "padded": " 12",
            "frac": 1.5,
            "empty": ""
        }));
        for field in ["bool", "obj", "text", "padded", "frac", "empty"] {
            let err = flexible_int(&o, field).unwrap_err();
            assert!(
                matches!(err, DecodeError::InvalidField { field: f, .. } if f == field),
                "{field} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_required_fields() {
        let o = obj(json!({ "s": 3, "i": "6" }));
        assert!(matches!(required_str(&o, "s"), Err(DecodeError::InvalidField { .. })));
        assert!(matches!(required_str(&o, "x"), Err(DecodeError::MissingField { field: "x", .. })));
        assert!(matches!(required_int(&o, "i"), Err(DecodeError::InvalidField { .. })));

        let o = obj(json!({ "whole": 6.0, "frac": 6.5 }));
        assert_eq!(required_int(&o, "whole").unwrap(), 6);
        assert!(matches!(required_int(&o, "frac"), Err(DecodeError::InvalidField { field: "frac", .. })));
    }

    #[test]
    fn test_str_list_reports_position() {
        let o = obj(json!({ "zones": ["jhr01", 2, "jhr03"] }));
        let err = required_str_list(&o, "zones").unwrap_err();
        assert!(matches!(err, DecodeError::Element { list: "zones", index: 1, .. }));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(matches!(parse_json(b"<html>"), Err(DecodeError::InvalidJson(_))));
        assert_eq!(parse_json(b"[]").unwrap(), json!([]));
    }

    #[test]
    fn test_root_cause_unwraps_nesting() {
        let inner = DecodeError::MissingField { field: "hijri", expected: "a string" };
        let err = DecodeError::Element {
            list: "prayers",
            index: 3,
            source: Box::new(inner.clone()),
        };
        assert_eq!(err.root_cause(), &inner);
        assert!(err.to_string().contains("element 3 of prayers"));
    }
}
