//! Recursive schema validation over dynamic configuration values.

use crate::model::{FieldSchema, FieldType, SchemaDefinition};
use crate::report::ValidationReport;
use serde_json::{Map, Value};

/// Validate a configuration value tree against a schema.
///
/// The schema is a closed contract: keys not defined by it are rejected at
/// every nesting level. All violations found in one call are collected; the
/// report never short-circuits across fields.
pub fn validate(schema: &SchemaDefinition, values: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();
    match values.as_object() {
        Some(map) => validate_object(schema, map, "", &mut report),
        None => report.push("configuration must be an object".to_string()),
    }
    report
}

/// Validate one object level, threading the field path for messages.
fn validate_object(
    schema: &SchemaDefinition,
    values: &Map<String, Value>,
    path: &str,
    report: &mut ValidationReport,
) {
    for key in values.keys() {
        if !schema.contains_key(key) {
            report.push(format!(
                "{} is not defined in the schema",
                join_path(path, key)
            ));
        }
    }

    for (name, field) in schema {
        let field_path = join_path(path, name);
        let value = values.get(name);

        if field.required && is_missing(field, value) {
            report.push(format!("{field_path} is required"));
            continue;
        }
        let Some(value) = value else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        if !matches_type(field.field_type, value) {
            report.push(format!(
                "{field_path} must be {}",
                field.field_type.expectation()
            ));
            continue;
        }
        check_allowed_values(field, value, &field_path, report);
        check_length(field, value, &field_path, report);

        if field.field_type == FieldType::Object {
            if let (Some(properties), Some(map)) = (&field.properties, value.as_object()) {
                validate_object(properties, map, &field_path, report);
            }
        }
        if field.field_type == FieldType::Array {
            if let (Some(items), Some(elements)) = (&field.items, value.as_array()) {
                validate_elements(items, elements, &field_path, report);
            }
        }
    }
}

/// Validate each array element against the shared item schema.
fn validate_elements(
    items: &FieldSchema,
    elements: &[Value],
    path: &str,
    report: &mut ValidationReport,
) {
    for (index, element) in elements.iter().enumerate() {
        let element_path = format!("{path}[{index}]");
        if items.field_type == FieldType::Object {
            if let Some(properties) = &items.properties {
                match element.as_object() {
                    Some(map) => validate_object(properties, map, &element_path, report),
                    None => report.push(format!("{element_path} must be an object")),
                }
                continue;
            }
        }
        if !matches_type(items.field_type, element) {
            report.push(format!(
                "{element_path} must be {}",
                items.field_type.expectation()
            ));
            continue;
        }
        check_allowed_values(items, element, &element_path, report);
    }
}

/// Whether a value matches the declared field type.
///
/// Objects explicitly exclude arrays; `serde_json` already keeps the two
/// variants apart. NaN cannot be represented by `serde_json::Number`, so a
/// number check is sufficient for the numeric rule.
fn matches_type(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String | FieldType::Secret => value.is_string(),
        FieldType::Number => value.is_number(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Array => value.is_array(),
        FieldType::Object => value.is_object(),
    }
}

/// Enum membership check for string-valued fields.
fn check_allowed_values(
    field: &FieldSchema,
    value: &Value,
    path: &str,
    report: &mut ValidationReport,
) {
    if !field.has_allowed_values() {
        return;
    }
    let Some(allowed) = &field.allowed_values else {
        return;
    };
    if let Some(text) = value.as_str() {
        if !allowed.iter().any(|candidate| candidate == text) {
            report.push(format!("{path} must be one of: {}", allowed.join(", ")));
        }
    }
}

/// Length bounds check for string, array, and object fields.
fn check_length(field: &FieldSchema, value: &Value, path: &str, report: &mut ValidationReport) {
    let Some(length) = measured_length(field.field_type, value) else {
        return;
    };
    if let Some(min) = field.min_length {
        if length < min {
            report.push(format!(
                "{path} must have at least {min} {}",
                length_unit(field.field_type, min)
            ));
        }
    }
    if let Some(max) = field.max_length {
        if length > max {
            report.push(format!(
                "{path} must have at most {max} {}",
                length_unit(field.field_type, max)
            ));
        }
    }
}

/// Length of a value under the schema's unit: characters, elements, or keys.
fn measured_length(field_type: FieldType, value: &Value) -> Option<usize> {
    match field_type {
        FieldType::String | FieldType::Secret => value.as_str().map(|s| s.chars().count()),
        FieldType::Array => value.as_array().map(Vec::len),
        FieldType::Object => value.as_object().map(Map::len),
        FieldType::Number | FieldType::Boolean => None,
    }
}

/// Unit word for length messages, pluralized by the bound.
fn length_unit(field_type: FieldType, count: usize) -> &'static str {
    match (field_type, count) {
        (FieldType::String | FieldType::Secret, 1) => "character",
        (FieldType::String | FieldType::Secret, _) => "characters",
        (FieldType::Array, 1) => "item",
        (FieldType::Array, _) => "items",
        (FieldType::Object, 1) => "property",
        _ => "properties",
    }
}

/// Whether a value counts as missing for the required rule.
///
/// Absent and null always count; the empty string counts for string-shaped
/// fields only.
fn is_missing(field: &FieldSchema, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => {
            text.is_empty()
                && matches!(field.field_type, FieldType::String | FieldType::Secret)
        }
        Some(_) => false,
    }
}

/// Join nested field paths for error messages.
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
