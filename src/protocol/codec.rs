//! Protocol codec
//!
//! Turns untyped JSON request bodies into validated commands.
//!
//! ## Field Rules
//! - `name`, `subject`: required strings; not empty or all whitespace when
//!   creating, any string when deleting
//! - `marks`: required JSON integer (no floats, no numeric strings)
//! - unknown fields are ignored
//!
//! Errors name the offending field, and for bulk bodies the item index,
//! so a client can point at exactly what to fix.

use serde_json::{Map, Value};

use crate::error::{GradebookError, Result};
use super::{Command, CommandType, NaturalKey, Student};

// =============================================================================
// Command Decoding
// =============================================================================

/// Decode a request body into the command of the given type
///
/// `List` ignores the body entirely.
pub fn decode_command(command_type: CommandType, body: &Value) -> Result<Command> {
    match command_type {
        CommandType::List => Ok(Command::List),
        CommandType::Create => decode_student(body).map(Command::Create),
        CommandType::CreateBulk => decode_bulk(body).map(Command::CreateBulk),
        CommandType::Delete => decode_key(body).map(Command::Delete),
    }
}

/// Decode a single `{name, subject, marks}` object
pub fn decode_student(body: &Value) -> Result<Student> {
    let fields = as_object(body)?;

    Ok(Student {
        name: text_field(fields, "name")?,
        subject: text_field(fields, "subject")?,
        marks: integer_field(fields, "marks")?,
    })
}

/// Decode an array of student objects
///
/// Fails on the first malformed item; nothing is returned for the others.
pub fn decode_bulk(body: &Value) -> Result<Vec<Student>> {
    let items = body.as_array().ok_or_else(|| {
        GradebookError::validation(format!("expected a JSON array, got {}", kind(body)))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            decode_student(item).map_err(|e| match e {
                GradebookError::Validation(msg) => {
                    GradebookError::Validation(format!("item {index}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Decode a `{name, subject}` deletion key
///
/// Empty strings are accepted: no stored record has one, so such a key
/// simply deletes nothing.
pub fn decode_key(body: &Value) -> Result<NaturalKey> {
    let fields = as_object(body)?;

    Ok(NaturalKey {
        name: string_field(fields, "name")?,
        subject: string_field(fields, "subject")?,
    })
}

// =============================================================================
// Field Helpers
// =============================================================================

fn as_object(body: &Value) -> Result<&Map<String, Value>> {
    body.as_object().ok_or_else(|| {
        GradebookError::validation(format!("expected a JSON object, got {}", kind(body)))
    })
}

fn string_field(fields: &Map<String, Value>, field: &str) -> Result<String> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_type(field, "a string", other)),
    }
}

fn text_field(fields: &Map<String, Value>, field: &str) -> Result<String> {
    let text = string_field(fields, field)?;
    if text.trim().is_empty() {
        return Err(GradebookError::validation(format!(
            "field `{field}` must not be empty"
        )));
    }
    Ok(text)
}

fn integer_field(fields: &Map<String, Value>, field: &str) -> Result<i64> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(missing(field)),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| wrong_type(field, "an integer", &Value::Number(n.clone()))),
        Some(other) => Err(wrong_type(field, "an integer", other)),
    }
}

fn missing(field: &str) -> GradebookError {
    GradebookError::validation(format!("missing field `{field}`"))
}

fn wrong_type(field: &str, expected: &str, got: &Value) -> GradebookError {
    GradebookError::validation(format!(
        "field `{field}` must be {expected}, got {}",
        kind(got)
    ))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(n) if n.as_i64().is_none() => "an out-of-range integer",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
