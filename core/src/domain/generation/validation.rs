use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::generation::errors::{GenerationError, ShapeViolation};

/// Checks `value` against a response schema.
///
/// Supports the subset the response schemas use: `object` with `properties`
/// and `required`, `array` with `items`, `string`, `integer` with `minimum`,
/// `number` and `boolean`. Keys that the schema does not mention are ignored.
pub fn validate_shape(schema: &Value, value: &Value) -> Result<(), ShapeViolation> {
    check(schema, value, "$")
}

/// Turns raw model text into a typed value, refusing anything off-schema.
pub fn parse_structured<T>(raw: &str, schema: &Value) -> Result<T, GenerationError>
where
    T: DeserializeOwned,
{
    let payload = strip_code_fence(raw.trim());
    if payload.is_empty() {
        return Err(GenerationError::MalformedOutput(
            "empty response body".to_string(),
        ));
    }

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        GenerationError::MalformedOutput(format!("response is not valid JSON: {}", e))
    })?;

    validate_shape(schema, &value)?;

    serde_json::from_value(value).map_err(|e| {
        GenerationError::InvalidShape(ShapeViolation {
            path: "$".to_string(),
            expected: "a value matching the domain type".to_string(),
            found: e.to_string(),
        })
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening line.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn check(schema: &Value, value: &Value, path: &str) -> Result<(), ShapeViolation> {
    match schema_type(schema) {
        "object" => {
            let object = value
                .as_object()
                .ok_or_else(|| violation(path, "object", kind_of(value)))?;
            let properties = schema.get("properties").and_then(Value::as_object);

            if let Some(required) = schema.get("required").and_then(Value::as_array) {
                for key in required.iter().filter_map(Value::as_str) {
                    if !object.contains_key(key) {
                        let expected = properties
                            .and_then(|p| p.get(key))
                            .map(schema_type)
                            .unwrap_or("value");
                        return Err(violation(&field_path(path, key), expected, "nothing"));
                    }
                }
            }

            if let Some(properties) = properties {
                for (key, child_schema) in properties {
                    if let Some(child) = object.get(key) {
                        check(child_schema, child, &field_path(path, key))?;
                    }
                }
            }

            Ok(())
        }
        "array" => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "array", kind_of(value)))?;

            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    check(item_schema, item, &format!("{}[{}]", path, index))?;
                }
            }

            Ok(())
        }
        "string" if value.is_string() => Ok(()),
        "string" => Err(violation(path, "string", kind_of(value))),
        "integer" => {
            if !(value.is_i64() || value.is_u64()) {
                return Err(violation(path, "integer", kind_of(value)));
            }

            if let (Some(minimum), Some(actual)) = (
                schema.get("minimum").and_then(Value::as_i64),
                value.as_i64(),
            ) && actual < minimum
            {
                return Err(violation(
                    path,
                    &format!("integer >= {}", minimum),
                    &actual.to_string(),
                ));
            }

            Ok(())
        }
        "number" if value.is_number() => Ok(()),
        "number" => Err(violation(path, "number", kind_of(value))),
        "boolean" if value.is_boolean() => Ok(()),
        "boolean" => Err(violation(path, "boolean", kind_of(value))),
        _ => Ok(()),
    }
}

fn schema_type(schema: &Value) -> &str {
    schema.get("type").and_then(Value::as_str).unwrap_or("any")
}

fn field_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn violation(path: &str, expected: &str, found: &str) -> ShapeViolation {
    ShapeViolation {
        path: path.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
