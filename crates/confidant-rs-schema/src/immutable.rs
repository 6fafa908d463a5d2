//! Immutability diff between a stored and a proposed configuration.

use crate::equality::{deep_equal, present};
use crate::model::{FieldSchema, FieldType, SchemaDefinition};
use crate::report::ValidationReport;
use crate::validate::join_path;
use serde_json::{Map, Value};

/// Compare an existing (decrypted) configuration against a proposed update
/// and report every forbidden change to an immutable field.
///
/// First-time assignment is always allowed: a field with no stored value
/// imposes no constraint, immutable or not.
pub fn diff_immutable(
    schema: &SchemaDefinition,
    old_values: &Value,
    new_values: &Value,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let empty = Map::new();
    let old = old_values.as_object().unwrap_or(&empty);
    let new = new_values.as_object().unwrap_or(&empty);
    diff_object(schema, old, new, "", &mut report);
    report
}

/// Diff one object level, threading the field path for messages.
fn diff_object(
    schema: &SchemaDefinition,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    path: &str,
    report: &mut ValidationReport,
) {
    for (name, field) in schema {
        let field_path = join_path(path, name);
        let old_value = present(old.get(name));
        let new_value = present(new.get(name));

        if field.immutable {
            match (old_value, new_value) {
                (Some(_), None) => report.push(format!(
                    "{field_path} is immutable and cannot be removed"
                )),
                (Some(old_value), Some(new_value)) if !deep_equal(old_value, new_value) => {
                    report.push(format!("{field_path} is immutable and cannot be changed"));
                }
                _ => {}
            }
        }

        if field.field_type == FieldType::Object {
            if let (Some(properties), Some(Value::Object(old_map)), Some(Value::Object(new_map))) =
                (&field.properties, old_value, new_value)
            {
                diff_object(properties, old_map, new_map, &field_path, report);
            }
        }
        if field.field_type == FieldType::Array {
            if let (Some(items), Some(Value::Array(old_items)), Some(Value::Array(new_items))) =
                (&field.items, old_value, new_value)
            {
                diff_elements(items, old_items, new_items, &field_path, report);
            }
        }
    }
}

/// Per-index diff for array elements under an immutable or nested schema.
///
/// A missing old element imposes no constraint (append is allowed); an index
/// present in old but absent or different in new reports a change at that
/// index, including when the array shrank.
fn diff_elements(
    items: &FieldSchema,
    old_items: &[Value],
    new_items: &[Value],
    path: &str,
    report: &mut ValidationReport,
) {
    let length = old_items.len().max(new_items.len());
    for index in 0..length {
        let element_path = format!("{path}[{index}]");
        let old_element = present(old_items.get(index));
        let new_element = present(new_items.get(index));

        if items.field_type == FieldType::Object && items.properties.is_some() {
            if let (
                Some(properties),
                Some(Value::Object(old_map)),
                Some(Value::Object(new_map)),
            ) = (&items.properties, old_element, new_element)
            {
                diff_object(properties, old_map, new_map, &element_path, report);
            }
            continue;
        }

        if items.immutable {
            match (old_element, new_element) {
                (Some(old_element), Some(new_element))
                    if !deep_equal(old_element, new_element) =>
                {
                    report.push(format!(
                        "{element_path} is immutable and cannot be changed"
                    ));
                }
                (Some(_), None) => report.push(format!(
                    "{element_path} is immutable and cannot be changed"
                )),
                _ => {}
            }
        }
    }
}
