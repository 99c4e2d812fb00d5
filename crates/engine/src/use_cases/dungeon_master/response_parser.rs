//! Response parser - strict validation of raw provider output.
//!
//! Schema:
//!
//! | field                  | rule                                                   |
//! |------------------------|--------------------------------------------------------|
//! | `dialogue`             | required string, non-empty after trim                  |
//! | `mood`                 | required, one of the five `DmMood` literals            |
//! | `difficultyAdjustment` | optional finite number, clamped to `[-1, 1]`           |
//! | `hintType`             | optional, one of the three `HintType` literals         |
//! | `hintContent`          | optional string, kept only when `hintType` is present  |
//!
//! `null` counts as absent for optional fields. Unknown fields are ignored.

use serde_json::{Map, Value};

use runesweeper_domain::{DmMood, DmResponse, HintType};

/// Raw provider output: text to be parsed, or an already-structured value
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Text(String),
    Structured(Value),
}

impl From<&str> for RawResponse {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawResponse {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponseParseError {
    #[error("malformed JSON: {0}")]
    Malformed(String),
    #[error("expected a JSON object at the top level, got {0}")]
    NotAnObject(&'static str),
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },
    #[error("field '{field}' has unsupported value '{value}'")]
    InvalidEnum { field: &'static str, value: String },
    #[error("field '{field}' must be a finite number")]
    NonFiniteNumber { field: &'static str },
}

/// Validate and normalize raw provider output.
pub fn parse_response(raw: impl Into<RawResponse>) -> Result<DmResponse, ResponseParseError> {
    let value = match raw.into() {
        RawResponse::Text(text) => serde_json::from_str::<Value>(text.trim())
            .map_err(|e| ResponseParseError::Malformed(e.to_string()))?,
        RawResponse::Structured(value) => value,
    };

    let object = match &value {
        Value::Object(map) => map,
        other => return Err(ResponseParseError::NotAnObject(json_kind(other))),
    };

    let dialogue = required_str(object, "dialogue")?;
    if dialogue.trim().is_empty() {
        return Err(ResponseParseError::EmptyField { field: "dialogue" });
    }

    let mood_raw = required_str(object, "mood")?;
    let mood: DmMood = mood_raw
        .parse()
        .map_err(|_| ResponseParseError::InvalidEnum {
            field: "mood",
            value: mood_raw.to_string(),
        })?;

    let difficulty = optional_number(object, "difficultyAdjustment")?;
    let hint_type = optional_str(object, "hintType")?
        .map(|raw| {
            raw.parse::<HintType>()
                .map_err(|_| ResponseParseError::InvalidEnum {
                    field: "hintType",
                    value: raw.to_string(),
                })
        })
        .transpose()?;
    let hint_content = optional_str(object, "hintContent")?;

    let mut response = DmResponse::new(dialogue, mood)
        .map_err(|_| ResponseParseError::EmptyField { field: "dialogue" })?;

    if let Some(adjustment) = difficulty {
        response = response
            .with_difficulty_adjustment(adjustment)
            .map_err(|_| ResponseParseError::NonFiniteNumber {
                field: "difficultyAdjustment",
            })?;
    }

    // hintContent without hintType is stripped
    if let Some(hint_type) = hint_type {
        response = response.with_hint(hint_type, hint_content);
    }

    Ok(response)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ResponseParseError> {
    match present(object, field) {
        None => Err(ResponseParseError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ResponseParseError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, ResponseParseError> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ResponseParseError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn optional_number(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f64>, ResponseParseError> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(Some)
            .ok_or(ResponseParseError::NonFiniteNumber { field }),
        Some(_) => Err(ResponseParseError::WrongType {
            field,
            expected: "a number",
        }),
    }
}
