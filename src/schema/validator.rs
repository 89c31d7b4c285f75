//! Value type checking
//!
//! - Field types match exactly (ints are not floats, but floats accept ints)
//! - No implicit coercion
//! - Array elements must be non-null and of the element type
//! - Float fields store every number as a float, so `1` and `1.0` are equal
//!
//! Presence rules (required vs defaulted, null handling) live in the
//! dynamic factory; this module only answers "does this value fit".

use serde_json::Value;

use super::errors::{RecordError, RecordResult};
use super::types::FieldType;

/// Checks a non-null value against a field type.
pub(crate) fn check_value(
    schema: &str,
    field_path: &str,
    value: &Value,
    expected: &FieldType,
) -> RecordResult<()> {
    let fits = match expected {
        FieldType::String => value.is_string(),
        FieldType::Int => value.is_i64() || value.is_u64(),
        FieldType::Bool => value.is_boolean(),
        FieldType::Float => value.is_number(),
        FieldType::Object => value.is_object(),
        FieldType::Any => !value.is_null(),
        FieldType::Array { element_type } => {
            let arr = value
                .as_array()
                .ok_or_else(|| type_error(schema, field_path, expected, value))?;

            for (i, elem) in arr.iter().enumerate() {
                let elem_path = format!("{}[{}]", field_path, i);
                if elem.is_null() {
                    return Err(RecordError::null_value(schema, &elem_path));
                }
                check_value(schema, &elem_path, elem, element_type)?;
            }
            true
        }
    };

    if fits {
        Ok(())
    } else {
        Err(type_error(schema, field_path, expected, value))
    }
}

/// Brings a checked value to its canonical stored form.
///
/// Integers in float position become floats; everything else is unchanged.
pub(crate) fn normalize_value(value: Value, expected: &FieldType) -> Value {
    match (expected, value) {
        (FieldType::Float, Value::Number(n)) => match n.as_f64() {
            Some(f) => Value::from(f),
            None => Value::Number(n),
        },
        (FieldType::Array { element_type }, Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .map(|item| normalize_value(item, element_type))
                .collect(),
        ),
        (_, other) => other,
    }
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(schema: &str, field_path: &str, expected: &FieldType, actual: &Value) -> RecordError {
    RecordError::TypeMismatch {
        schema: schema.to_string(),
        field: field_path.to_string(),
        expected: expected.type_name().to_string(),
        actual: json_type_name(actual).to_string(),
    }
}
