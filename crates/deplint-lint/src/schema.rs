//! # Schema Validator
//!
//! Validates a flat service config file against [`CONFIG_SCHEMA`]. After the
//! file is read and parsed, three passes always run so one call surfaces
//! every problem:
//!
//! 1. required keys present;
//! 2. known keys have the declared type and, for enumerated strings, an
//!    allowed value;
//! 3. unknown keys produce warnings.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use deplint_core::{schema_field, FieldType, SchemaValidationResult, CONFIG_SCHEMA};

/// Validate one config file.
pub fn validate_schema(config_path: &Path) -> SchemaValidationResult {
    let mut result = SchemaValidationResult::new(config_path);

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("cannot read file: {e}"));
            return result;
        }
    };

    if content.trim().is_empty() {
        result.add_warning("config file is empty");
        return result;
    }

    let doc: Value = match serde_yaml::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result.add_error(format!("YAML parse error: {e}"));
            return result;
        }
    };

    let config = match doc {
        Value::Null => Mapping::new(),
        Value::Mapping(m) => m,
        other => {
            result.add_error(format!(
                "YAML parse error: expected a mapping of config keys, got {}",
                value_kind(&other)
            ));
            return result;
        }
    };

    if config.is_empty() {
        result.add_warning("config file is empty");
        return result;
    }

    check_required_fields(&config, &mut result);
    check_field_types(&config, &mut result);
    check_unknown_fields(&config, &mut result);

    result
}

fn check_required_fields(config: &Mapping, result: &mut SchemaValidationResult) {
    for field in CONFIG_SCHEMA.iter().filter(|f| f.required) {
        if !config.contains_key(field.name) {
            result.add_error(format!(
                "Required field '{}' missing ({})",
                field.name, field.description
            ));
        }
    }
}

fn check_field_types(config: &Mapping, result: &mut SchemaValidationResult) {
    for (key, value) in config {
        let Some(field) = key.as_str().and_then(schema_field) else {
            continue;
        };
        let name = field.name;

        match field.field_type {
            FieldType::String => match value.as_str() {
                Some(s) => {
                    if !field.valid_values.is_empty() && !field.valid_values.iter().any(|v| *v == s)
                    {
                        result.add_error(format!(
                            "Field '{name}' value '{s}' not in allowed values: [{}]",
                            field.valid_values.join(", ")
                        ));
                    }
                }
                None => type_error(result, name, field.field_type, value),
            },
            FieldType::Int => {
                if !value.is_number() {
                    type_error(result, name, field.field_type, value);
                }
            }
            FieldType::Bool => {
                if !value.is_bool() {
                    type_error(result, name, field.field_type, value);
                }
            }
            FieldType::StringArray => match value.as_sequence() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            result.add_error(format!(
                                "Field '{name}[{i}]' must be a string, got {}",
                                value_kind(item)
                            ));
                        }
                    }
                }
                None => type_error(result, name, field.field_type, value),
            },
        }
    }
}

fn check_unknown_fields(config: &Mapping, result: &mut SchemaValidationResult) {
    for key in config.keys() {
        let known = key.as_str().and_then(schema_field).is_some();
        if !known {
            let name = key
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{key:?}"));
            result.add_warning(format!("Unknown field '{name}' (not in schema)"));
        }
    }
}

fn type_error(
    result: &mut SchemaValidationResult,
    name: &str,
    expected: FieldType,
    value: &Value,
) {
    let article = match expected {
        FieldType::Int => "an",
        _ => "a",
    };
    result.add_error(format!(
        "Field '{name}' must be {article} {expected}, got {}",
        value_kind(value)
    ));
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
